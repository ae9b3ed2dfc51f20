//! ReadEscape — a distraction-free reading mode engine for web pages.
//!
//! Entry point: runs an interactive console demo against an embedded sample
//! page, exercising discovery, mode cycling, grayout, and the message
//! protocol.

use serde_json::json;

const SAMPLE_PAGE: &str = r#"<html><body class="site">
<nav class="site-nav">Home | Archive | About</nav>
<div class="banner-ad">Buy now! Limited offer!</div>
<article>
  <h1>On the Care and Feeding of Long-Form Reading</h1>
  <p>Pages accumulate chrome: navigation bars, related-content rails,
  newsletter prompts, and advertisements wedged between paragraphs. The text
  a reader came for ends up in a narrow channel between distractions.</p>
  <p>A reading mode inverts that ratio. It finds the main content, copies it
  into a clean container at a comfortable measure, and puts everything back
  exactly as it was when the reader is done.</p>
  <div class="ads">Sponsored: this paragraph is not part of the article.</div>
  <p>Comment sections are preserved when configured, because sometimes the
  discussion is the best part.</p>
</article>
<div class="comments"><div class="comment-list">
  <p>First! Great article.</p>
  <p>The part about the measure matches my experience.</p>
</div></div>
<footer>© example.test</footer>
</body></html>"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              ReadEscape v{} — Demo Mode                   ║", env!("CARGO_PKG_VERSION"));
    println!("║     Distraction-free reading for cluttered pages           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_settings();
    demo_discovery();
    demo_reading_mode();
    demo_grayout();
    demo_messages();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_settings() {
    use readescape::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    section("Settings Engine");

    let mut engine = SettingsEngine::new(None);
    let settings = match engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            println!("  Settings file unreadable ({}), using defaults", e);
            engine.get_settings().clone()
        }
    };
    println!("  Config path: {}", engine.get_config_path());
    println!(
        "  {} reading mode(s), {} content selectors, min length {}",
        settings.reading_modes.len(),
        settings.content_selectors.len(),
        settings.min_content_length
    );
    println!("  ✓ SettingsEngine OK");
    println!();
}

fn demo_discovery() {
    use readescape::dom::PageDocument;
    use readescape::services::content_discovery::ContentDiscovery;
    use readescape::types::settings::ReadingSettings;
    section("Content Discovery");

    let page = PageDocument::parse(SAMPLE_PAGE);
    let settings = ReadingSettings::default();
    let mut discovery = ContentDiscovery::new();

    if let Some(main) = discovery.find_main_content(&page, &settings) {
        let markup = page.inner_html(main).unwrap_or_default();
        println!("  Main content found ({} bytes of markup)", markup.len());
    }
    if let Some(comments) = discovery.find_comment_section(&page, &settings) {
        let markup = page.inner_html(comments).unwrap_or_default();
        println!("  Comment section found ({} bytes of markup)", markup.len());
    }
    println!("  ✓ ContentDiscovery OK");
    println!();
}

fn demo_reading_mode() {
    use readescape::dom::PageDocument;
    use readescape::services::reading_mode::{ReadingModeController, ReadingModeTrait};
    use readescape::types::settings::ReadingSettings;
    section("Reading Mode");

    let mut page = PageDocument::parse(SAMPLE_PAGE);
    let body = page.body_id().unwrap_or_else(|| page.root_element_id());
    let original = page.inner_html(body).unwrap_or_default();

    let mut controller = ReadingModeController::new(ReadingSettings::default());
    let status = controller.cycle(&mut page);
    println!(
        "  Cycled on: mode {} \"{}\" at {}px",
        status.mode_index,
        status.mode_name,
        status.mode_width.unwrap_or(0)
    );
    let swapped = page.inner_html(body).unwrap_or_default();
    println!(
        "  Body swapped: {} bytes -> {} bytes, ads stripped: {}",
        original.len(),
        swapped.len(),
        !swapped.contains("banner-ad")
    );

    let status = controller.cycle(&mut page);
    let restored = page.inner_html(body).unwrap_or_default();
    println!(
        "  Cycled off: \"{}\", original restored byte-for-byte: {}",
        status.mode_name,
        restored == original
    );
    println!("  ✓ ReadingModeController OK");
    println!();
}

fn demo_grayout() {
    use readescape::services::grayout::darken;
    section("Background Grayout");

    println!("  darken(\"#ffffff\", 0.2)        = {}", darken("#ffffff", 0.2));
    println!(
        "  darken(\"rgb(100,150,200)\", 0.5) = {}",
        darken("rgb(100,150,200)", 0.5)
    );
    println!("  darken(\"transparent\", 0.2)    = {}", darken("transparent", 0.2));
    println!("  ✓ BackgroundGrayout OK");
    println!();
}

fn demo_messages() {
    use readescape::app::App;
    use readescape::dom::PageDocument;
    use readescape::message_handler::handle_message;
    section("Message Protocol");

    let mut app = App::new(None);
    let mut page = PageDocument::parse(SAMPLE_PAGE);
    app.initialize(&mut page);

    let response = handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    println!("  toggle-reading-mode       -> {}", response);
    let response = handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    println!("  toggle-reading-mode       -> {}", response);
    let response = handle_message(
        &mut app,
        &mut page,
        &json!({"action": "toggle-grayout-background"}),
    );
    println!("  toggle-grayout-background -> {}", response);
    let response = handle_message(&mut app, &mut page, &json!({"action": "no-such-action"}));
    println!("  no-such-action            -> {}", response);
    println!("  ✓ Message handler OK");
    println!();
}
