use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::coordinator::UiMessage;
use crate::domain::{Language, RenderEvent, TextStyle};

/// Run a single fetch cycle headlessly, printing render events as they
/// arrive until the cycle's completion signal.
pub async fn fetch_once(ctx: &AppContext, config: &Config, target: Language) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let coordinator = ctx.coordinator(tx);

    let generation = coordinator.start_cycle(config.sources()?, target);

    while let Some(msg) = rx.recv().await {
        match msg {
            UiMessage::Render {
                generation: g,
                event,
            } if g == generation => match event {
                RenderEvent::TextBlock {
                    text,
                    style: TextStyle::Title,
                } => println!("\n# {}", text),
                RenderEvent::TextBlock { text, .. } => println!("{}", text),
                RenderEvent::Image(bitmap) => {
                    println!("[image {}x{}]", bitmap.width(), bitmap.height())
                }
                RenderEvent::ErrorNotice(text) => println!("! {}", text),
            },
            UiMessage::CycleFinished { generation: g } if g == generation => break,
            _ => {}
        }
    }

    println!("\nFetched {} entries", coordinator.snapshot().len());
    Ok(())
}

pub fn list_sources(config: &Config) -> Result<()> {
    for source in config.sources()? {
        println!("{}", source);
    }
    Ok(())
}

pub fn list_languages() {
    for language in Language::ALL {
        println!("{}", language.code());
    }
}
