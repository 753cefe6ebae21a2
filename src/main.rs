//! КБЖУ Tracker desktop application
//!
//! Photograph a meal, send it for analysis and read off the calories and macros.

use std::path::Path;
use std::sync::Arc;

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use kbju_tracker::config::CONFIG_FILE_NAME;
use kbju_tracker::render::with_unit;
use kbju_tracker::{
    default_analyzer, Analyzer, AppError, Config, DefaultAnalyzer, ResultView,
    UploadAnalysisController,
};

type Controller = UploadAnalysisController<DefaultAnalyzer>;

// -----------------------------------------------------------------------------
// Main Application
// -----------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::load_or_default(Path::new(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Ignoring {}: {}", CONFIG_FILE_NAME, error);
            Config::default()
        }
    };
    log::info!("Using analysis backend at {}", config.api_base_url);
    let analyzer = match default_analyzer(&config) {
        Ok(analyzer) => Arc::new(analyzer),
        Err(error) => {
            log::error!("Failed to set up the analyzer: {}", error);
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .with_context(analyzer)
        .launch(App);
}

/// Root application component
#[component]
fn App() -> Element {
    let config = use_context::<Config>();
    let analyzer = use_context::<Arc<DefaultAnalyzer>>();
    let controller = use_signal({
        let analyzer = analyzer.clone();
        move || Controller::from_shared(analyzer)
    });

    use_effect(move || {
        if !config.probe_health {
            return;
        }
        let analyzer = analyzer.clone();
        spawn(async move {
            match analyzer.health().await {
                Ok(()) => log::info!("Analysis backend is up"),
                Err(error) => log::warn!("Analysis backend unavailable: {}", error),
            }
        });
    });

    rsx! {
        style { {STYLES} }
        div { class: "app-container",
            AppHeader {}
            main { class: "app-main",
                TrackerPanel { controller }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// UI Components
// -----------------------------------------------------------------------------

#[component]
fn AppHeader() -> Element {
    rsx! {
        header { class: "app-header",
            h1 { "🥗 КБЖУ-трекер" }
            p { "Сфотографируйте блюдо, чтобы узнать калории, белки, жиры и углеводы" }
        }
    }
}

#[component]
fn TrackerPanel(controller: Signal<Controller>) -> Element {
    let state = controller.read().state().clone();
    let preview_url = controller.read().preview_url().map(str::to_string);
    let result_view = controller.read().result_view();

    rsx! {
        section { class: "tracker-panel",
            if state.shows_upload() {
                UploadArea { controller }
            }
            if let Some(src) = preview_url {
                PreviewArea { controller, src }
            }
            LoadingIndicator { visible: state.is_loading() }
            if let Some(view) = result_view {
                ResultCard { view }
            }
            if let Some(message) = state.error_message() {
                p { class: "error-line", "⚠️ {message}" }
            }
        }
    }
}

#[component]
fn UploadArea(controller: Signal<Controller>) -> Element {
    let mut drag_over = use_signal(|| false);

    let handle_file_select = move |event: Event<FormData>| {
        let files = event.files();
        if let Some(file) = files.first().cloned() {
            load_selected_file(file, controller);
        }
    };

    rsx! {
        div {
            class: if drag_over() { "upload-area drag-over" } else { "upload-area" },
            ondragover: move |event: Event<DragData>| {
                event.prevent_default();
                drag_over.set(true);
            },
            ondragleave: move |_| drag_over.set(false),
            ondrop: move |event: Event<DragData>| {
                event.prevent_default();
                drag_over.set(false);
                if let Some(file) = event.files().first().cloned() {
                    load_selected_file(file, controller);
                }
            },
            input {
                r#type: "file",
                accept: "image/*",
                onchange: handle_file_select,
                id: "file-input",
            }
            label {
                r#for: "file-input",
                class: "upload-label",
                div { class: "upload-icon", "📷" }
                p { "Нажмите, чтобы выбрать фото, или перетащите его сюда" }
                p { "JPG, PNG, WebP, HEIC" }
            }
        }
    }
}

#[component]
fn PreviewArea(mut controller: Signal<Controller>, src: String) -> Element {
    let state = controller.read().state().clone();
    let can_analyze = controller.read().can_analyze();

    rsx! {
        div { class: "preview-area",
            img { class: "preview-image", src: "{src}", alt: "Выбранное фото" }
            div { class: "preview-actions",
                button {
                    class: "remove-button",
                    onclick: move |_| controller.write().remove(),
                    "✕ Удалить"
                }
                button {
                    class: "analyze-button",
                    disabled: !can_analyze,
                    onclick: move |_| start_analysis(controller),
                    if state.is_loading() { "Анализируем..." } else { "🔍 Анализировать" }
                }
            }
        }
    }
}

#[component]
fn LoadingIndicator(visible: bool) -> Element {
    if !visible {
        return rsx! {}.into();
    }

    rsx! {
        div { class: "loading-indicator",
            div { class: "spinner", "⏳" }
            p { "Анализируем фото..." }
        }
    }
}

#[component]
fn ResultCard(view: ResultView) -> Element {
    let calories = with_unit(&view.calories, "ккал");

    rsx! {
        div { class: "result-card",
            h3 { "{view.dish_name}" }
            div { class: "calories",
                span { class: "calories-value", "{calories}" }
            }
            div { class: "macros",
                MacroValue { label: "Белки", value: view.proteins.clone() }
                MacroValue { label: "Жиры", value: view.fats.clone() }
                MacroValue { label: "Углеводы", value: view.carbs.clone() }
            }
            if !view.annotation.is_empty() {
                p { class: "annotation", "{view.annotation}" }
            }
            if let Some(at) = view.analyzed_at.clone() {
                p { class: "analyzed-at", "Анализ выполнен в {at}" }
            }
        }
    }
}

#[component]
fn MacroValue(label: &'static str, value: String) -> Element {
    let grams = with_unit(&value, "г");

    rsx! {
        div { class: "macro",
            span { class: "macro-value", "{grams}" }
            span { class: "macro-label", "{label}" }
        }
    }
}

// -----------------------------------------------------------------------------
// Event Handlers
// -----------------------------------------------------------------------------

fn load_selected_file(mut file: FileData, mut controller: Signal<Controller>) {
    spawn(async move {
        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                let error = AppError::FileProcessing(e.to_string());
                log::error!("Error reading selected file: {}", error);
                show_notice(error.user_message()).await;
                return;
            }
        };

        let content_type = file.content_type();
        let result = controller
            .write()
            .select(&file.name(), content_type.as_deref(), bytes);
        if let Err(error) = result {
            show_notice(error.user_message()).await;
        }
    });
}

fn start_analysis(mut controller: Signal<Controller>) {
    let ticket = match controller.write().begin_analysis() {
        Ok(ticket) => ticket,
        Err(error) => {
            log::warn!("Analysis not started: {}", error);
            return;
        }
    };
    let analyzer = controller.read().analyzer();

    spawn(async move {
        let outcome = analyzer.analyze(&ticket.image).await;
        let result = controller.write().finish_analysis(ticket.id, outcome);
        if let Err(error) = result {
            show_notice(error.user_message()).await;
        }
    });
}

/// Blocking notice over the main window
async fn show_notice(message: String) {
    rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("КБЖУ-трекер")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show()
        .await;
}

// ============================================================================
// Styling
// ============================================================================

const STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

html, body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
    background: #f7faf5;
    color: #1f2933;
}

.app-container {
    display: flex;
    flex-direction: column;
    height: 100vh;
}

.app-header {
    background: linear-gradient(135deg, #15803d 0%, #22c55e 100%);
    color: white;
    padding: 1.5rem 2rem;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
}

.app-header h1 {
    font-size: 1.8rem;
    font-weight: 800;
}

.app-header p {
    opacity: 0.9;
    margin-top: 0.25rem;
}

.app-main {
    flex: 1;
    overflow-y: auto;
    padding: 2rem;
}

.tracker-panel {
    max-width: 640px;
    margin: 0 auto;
    background: white;
    border-radius: 12px;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.06);
    padding: 2rem;
}

.upload-area .upload-label {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 3rem;
    border: 3px dashed #d1d5db;
    border-radius: 12px;
    cursor: pointer;
    transition: all 0.3s ease;
}

.upload-area.drag-over .upload-label,
.upload-area .upload-label:hover {
    border-color: #22c55e;
    background: #f0fdf4;
}

.upload-icon {
    font-size: 3rem;
    margin-bottom: 1rem;
}

.upload-label p {
    color: #6b7280;
    margin: 0.25rem 0;
}

#file-input {
    display: none;
}

.preview-image {
    width: 100%;
    max-height: 360px;
    object-fit: contain;
    border-radius: 8px;
    background: #f3f4f6;
}

.preview-actions {
    display: flex;
    gap: 0.75rem;
    margin-top: 1rem;
}

.preview-actions button {
    flex: 1;
    padding: 0.75rem;
    border: none;
    border-radius: 8px;
    font-weight: 600;
    cursor: pointer;
}

.remove-button {
    background: #fee2e2;
    color: #dc2626;
}

.analyze-button {
    background: #16a34a;
    color: white;
}

.analyze-button:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.loading-indicator {
    display: flex;
    align-items: center;
    gap: 1rem;
    margin-top: 1.5rem;
    padding: 1rem;
    background: #dcfce7;
    border-radius: 8px;
    color: #15803d;
    font-weight: 600;
}

.spinner {
    font-size: 1.5rem;
    animation: spin 2s linear infinite;
}

@keyframes spin {
    to { transform: rotate(360deg); }
}

.result-card {
    margin-top: 1.5rem;
    padding: 1.5rem;
    border: 2px solid #bbf7d0;
    border-radius: 12px;
    background: #f0fdf4;
}

.result-card h3 {
    font-size: 1.4rem;
    color: #15803d;
}

.calories {
    margin: 0.75rem 0;
}

.calories-value {
    font-size: 2.5rem;
    font-weight: 800;
}

.macros {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 0.75rem;
}

.macro {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 0.75rem;
    background: white;
    border-radius: 8px;
}

.macro-value {
    font-size: 1.2rem;
    font-weight: 700;
}

.macro-label {
    color: #6b7280;
    font-size: 0.85rem;
}

.annotation,
.analyzed-at {
    margin-top: 0.75rem;
    color: #4b5563;
    font-size: 0.9rem;
}

.error-line {
    margin-top: 1.5rem;
    padding: 1rem;
    background: #fef2f2;
    border-radius: 8px;
    color: #b91c1c;
}
"#;
