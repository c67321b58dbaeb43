use lingo::{Language, LocalizationConfig, LocalizedHandle, ScaffoldOutcome, Seed, TranslationStore};
use tracing_subscriber::EnvFilter;

const PREFERENCES: &str = "target/lingo-demo/preferences.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = LocalizationConfig::new("target/lingo-demo/assets", "localization.csv");
    let mut store = TranslationStore::with_disk(config, PREFERENCES).unwrap();

    let labels: Vec<LocalizedHandle> = ["greeting", "farewell", "missing"]
        .into_iter()
        .map(LocalizedHandle::from)
        .collect();

    let refreshed = labels.clone();
    store.subscribe(move |store| {
        for label in &refreshed {
            println!("{:>10}: {}", label.code(), label.resolve_or_code(store));
        }
        Ok(())
    });

    // this is the "Create Localization File" button
    if store.ensure_file_exists(&Seed::default()) == ScaffoldOutcome::Created {
        println!("created {}", store.config().path().display());
    }

    store.initialize().unwrap();

    let console = dialoguer::console::Term::stderr();

    loop {
        let current = store.language().unwrap();
        let mut selection = dialoguer::Select::new();
        selection.with_prompt(format!("language (currently {})", current.display_name()));

        for language in Language::ALL {
            selection.item(language.display_name());
        }
        selection.item("quit");
        selection.default(current.ordinal());

        let choice = selection.interact_on(&console).unwrap();
        let Some(language) = Language::ALL.get(choice).copied() else {
            break;
        };

        store.set_language(language).unwrap();
    }

    println!("demo completed");
}
