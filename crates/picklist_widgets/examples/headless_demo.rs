//! Headless Dropdown Demo
//!
//! Drives a plain and a searchable dropdown with simulated host signals and
//! prints what a host would render after each step.
//!
//! Features demonstrated:
//! - Settings loaded from TOML
//! - Auto open after the mount delay
//! - Search filtering with a trigger limit
//! - Free text committed on dismiss
//! - Keyboard listeners released on unmount
//!
//! Run with: RUST_LOG=debug cargo run -p picklist_widgets --example headless_demo

use std::sync::Arc;

use picklist_core::Result;
use picklist_platform::{KeyboardEvent, KeyboardSource, SoftKeyboard};
use picklist_widgets::prelude::*;

const SETTINGS: &str = r#"
placeholder = "Pick a city"
filter_trigger_limit = 2
show_no_options_text = true
no_options_text = "Nothing matches"
"#;

fn cities() -> Vec<SelectOption<String>> {
    vec![
        SelectOption::new("Berlin", "BER".to_string()),
        SelectOption::new("Bern", "BRN".to_string()),
        SelectOption::new("Bremen", "BRE".to_string()),
        SelectOption::new("Saint-Martin-de-Belleville", "SMB".to_string()),
    ]
}

fn render(label: &str, control: &Dropdown<String>) -> Result<()> {
    let options = match control.visible_options() {
        OptionsView::Pending => "(type to search)".to_string(),
        OptionsView::List(options) => options
            .iter()
            .map(|option| option.title.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        OptionsView::Empty { message } => message.unwrap_or("").to_string(),
    };
    println!(
        "{:<24} value box: {:<20} indicator: {:?} open: {:<5} list: {}",
        label,
        control.display_value()?,
        control.indicator().direction,
        control.is_open(),
        options,
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let keyboard = SoftKeyboard::shared();
    let source: Arc<dyn KeyboardSource> = keyboard.clone();
    let settings = DropdownSettings::from_toml_str(SETTINGS)?;

    // Plain dropdown that opens by itself
    let mut plain = pk::dropdown(cities())
        .settings(settings.clone())
        .cut(true)
        .initially_open(true)
        .keyboard(Arc::clone(&source))
        .on_select(|code: &String| tracing::info!("plain selected {}", code))
        .build()?;

    plain.mount(0);
    render("mounted", &plain)?;
    plain.tick(2000);
    render("auto opened", &plain)?;
    plain.select_index(3);
    render("selected", &plain)?;
    plain.unmount();

    // Searchable dropdown accepting free text
    let mut search = pk::searchable_dropdown(cities())
        .settings(settings)
        .filter(|option, text| option.title.to_lowercase().starts_with(&text.to_lowercase()))
        .must_match_options(false)
        .keyboard(source)
        .on_select(|city: &String| tracing::info!("search committed {}", city))
        .build()?;

    search.mount(0);
    search.handle_event(HostEvent::Press);
    keyboard.emit(KeyboardEvent::DidShow);
    for text in ["b", "be", "ber", "bonn"] {
        search.set_search_text(text);
        render(&format!("searched {:?}", text), &search)?;
    }
    search.handle_event(HostEvent::Dismiss(DismissReason::OutsideTap));
    render("dismissed", &search)?;

    search.unmount();
    println!(
        "listeners left: {}, keyboard visible: {}",
        keyboard.listener_count(),
        keyboard.is_visible()
    );

    Ok(())
}
