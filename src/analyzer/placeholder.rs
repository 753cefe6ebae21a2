use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;

use super::Analyzer;
use crate::error::AppResult;
use crate::models::{AnalysisResult, Confidence};
use crate::selection::SelectedImage;

/// Simulated network latency
pub const PLACEHOLDER_DELAY: Duration = Duration::from_millis(1500);

/// Offline stand-in that answers with one of a few canned dishes.
///
/// Picks follow a splitmix64 sequence, so a fixed seed gives a fixed order.
#[derive(Debug)]
pub struct PlaceholderAnalyzer {
    delay: Duration,
    state: AtomicU64,
    results: Vec<AnalysisResult>,
}

impl Default for PlaceholderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderAnalyzer {
    /// Seeded from the clock.
    pub fn new() -> Self {
        let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            delay: PLACEHOLDER_DELAY,
            state: AtomicU64::new(seed),
            results: canned_results(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn next_index(&self) -> usize {
        let mut z = self
            .state
            .fetch_add(0x9E37_79B9_7F4A_7C15, Ordering::Relaxed)
            .wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z % self.results.len() as u64) as usize
    }
}

impl Analyzer for PlaceholderAnalyzer {
    async fn analyze(&self, image: &SelectedImage) -> AppResult<AnalysisResult> {
        log::info!("Placeholder analysis of {} ({} bytes)", image.file_name, image.bytes.len());
        tokio::time::sleep(self.delay).await;
        Ok(self.results[self.next_index()].clone())
    }

    async fn health(&self) -> AppResult<()> {
        Ok(())
    }
}

/// The fixed menu the placeholder chooses from
pub fn canned_results() -> Vec<AnalysisResult> {
    vec![
        AnalysisResult {
            product_name: Some("Овсяная каша с бананом".to_string()),
            calories: Some(320.0),
            proteins: Some(9.0),
            fats: Some(7.0),
            carbs: Some(55.0),
            weight: Some(300.0),
            confidence: Some(Confidence::High),
            notes: None,
        },
        AnalysisResult {
            product_name: Some("Куриная грудка с рисом".to_string()),
            calories: Some(450.0),
            proteins: Some(38.0),
            fats: Some(9.0),
            carbs: Some(52.0),
            weight: Some(350.0),
            confidence: Some(Confidence::Medium),
            notes: Some("Рис отварной, без масла".to_string()),
        },
        AnalysisResult {
            product_name: Some("Салат Цезарь".to_string()),
            calories: Some(380.0),
            proteins: Some(18.0),
            fats: Some(26.0),
            carbs: Some(16.0),
            weight: Some(250.0),
            confidence: Some(Confidence::Medium),
            notes: Some("Калорийность сильно зависит от соуса".to_string()),
        },
        AnalysisResult {
            product_name: Some("Борщ со сметаной".to_string()),
            calories: Some(210.0),
            proteins: Some(7.0),
            fats: Some(11.0),
            carbs: Some(21.0),
            weight: Some(400.0),
            confidence: Some(Confidence::Low),
            notes: None,
        },
        AnalysisResult {
            product_name: Some("Омлет из двух яиц".to_string()),
            calories: Some(230.0),
            proteins: Some(15.0),
            fats: Some(18.0),
            carbs: Some(2.0),
            weight: Some(150.0),
            confidence: Some(Confidence::High),
            notes: None,
        },
    ]
}
