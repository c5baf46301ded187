// SPDX-License-Identifier: MPL-2.0
use page_locale::config;
use page_locale::error::Result;
use page_locale::i18n::{Language, TranslationCatalog};
use page_locale::localizer::Localizer;
use page_locale::page::{markup, StaticPage};
use page_locale::storage::ConfigStore;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
page-locale: resolve, switch and preview the language of a localized page

USAGE:
  page-locale [OPTIONS] [FILE]

ARGS:
  FILE                 Page markup to preview in the active language

OPTIONS:
  --lang CODE          Switch to CODE (en, ru, zh, uk) and remember it
  --locale TAG         Locale used when no language is stored (default: system locale)
  --config-dir DIR     Directory holding settings.toml
  --check              Verify every translation table defines the same keys
  -h, --help           Print this help
";

#[derive(Debug, Default)]
struct Flags {
    lang: Option<String>,
    locale: Option<String>,
    config_dir: Option<PathBuf>,
    check: bool,
    file_path: Option<PathBuf>,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        locale: args.opt_value_from_str("--locale")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        check: args.contains("--check"),
        file_path: args.finish().into_iter().next().map(PathBuf::from),
    };
    Ok(Some(flags))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("page-locale: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("page-locale: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(flags: Flags) -> Result<ExitCode> {
    let catalog = TranslationCatalog::builtin()?;

    if flags.check {
        return Ok(check_catalog(&catalog));
    }

    let (cfg, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        tracing::warn!(warning = %warning, "using default settings");
    }

    let mut page = match &flags.file_path {
        Some(path) => markup::scan(&std::fs::read_to_string(path)?, &cfg.page)?,
        None => StaticPage::new(),
    };

    let locale = flags.locale.or_else(sys_locale::get_locale);
    let mut localizer = Localizer::new(catalog, ConfigStore::with_base_dir(flags.config_dir));
    localizer.initialize(&mut page, locale.as_deref());

    if let Some(lang) = flags.lang.as_deref() {
        if Language::from_code(lang).is_none() {
            tracing::warn!(code = lang, "unsupported language code");
        }
        localizer.switch_language(&mut page, lang);
    }

    if flags.file_path.is_some() {
        for element in page.elements() {
            println!("{}\t{}", element.key, element.text);
        }
        for key in page.unknown_keys(localizer.catalog()) {
            tracing::warn!(key, "page uses a key the catalog does not define");
        }
    } else if let Some(code) = localizer.active_language() {
        println!("{code}");
    }

    Ok(ExitCode::SUCCESS)
}

fn check_catalog(catalog: &TranslationCatalog) -> ExitCode {
    let report = catalog.completeness();
    if report.is_complete() {
        println!(
            "catalog complete: {} keys in {} languages",
            catalog.keys("en").len(),
            catalog.languages().count()
        );
        return ExitCode::SUCCESS;
    }
    for (lang, keys) in &report.missing {
        println!("{lang}: missing {}", keys.join(", "));
    }
    for (lang, keys) in &report.extra {
        println!("{lang}: extra {}", keys.join(", "));
    }
    ExitCode::FAILURE
}
