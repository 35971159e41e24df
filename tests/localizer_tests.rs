use std::{fs, path::Path};

use kvlocale::{
    Error, ErrorPolicy, FormatHandler, HandlerRegistry, JsonHandler, Localizer, LocalizerOptions,
    Outcome,
};

fn strict_localizer() -> Localizer {
    Localizer::with_options(LocalizerOptions::new().with_strict(true))
}

#[test]
fn test_json_scenario_add_and_read() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();

    let path = localizer
        .create_localization_file(tmp.path(), "en", "json")
        .unwrap()
        .applied()
        .unwrap();
    assert_eq!(path, tmp.path().join("en.json"));
    assert!(path.exists());

    assert!(
        localizer
            .add_key_value_pair("en", "greeting", "hello")
            .unwrap()
            .is_applied()
    );

    let greeting = localizer.get_localized_string("en", "greeting").unwrap();
    assert!(matches!(greeting, Outcome::Applied(Some(ref value)) if value == "hello"));

    let missing = localizer.get_localized_string("en", "missing").unwrap();
    assert!(matches!(missing, Outcome::Applied(None)));
}

#[test]
fn test_txt_scenario_duplicate_key() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "fr", ".txt")
        .unwrap();
    let path = tmp.path().join("fr.txt");

    localizer
        .add_key_value_pair("fr", "greeting", "bonjour")
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "greeting: bonjour\n");

    let outcome = localizer
        .add_key_value_pair("fr", "greeting", "salut")
        .unwrap();
    assert!(matches!(
        outcome.skipped_reason(),
        Some(Error::DuplicateKey { key, .. }) if key == "greeting"
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "greeting: bonjour\n");
}

#[test]
fn test_json_duplicate_key_leaves_file_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "en", "json")
        .unwrap();
    localizer
        .add_key_value_pair("en", "greeting", "hello")
        .unwrap();
    let before = fs::read(tmp.path().join("en.json")).unwrap();

    let outcome = localizer.add_key_value_pair("en", "greeting", "hi").unwrap();
    assert!(matches!(
        outcome.skipped_reason(),
        Some(Error::DuplicateKey { .. })
    ));
    assert_eq!(fs::read(tmp.path().join("en.json")).unwrap(), before);
    assert_eq!(
        localizer
            .get_localized_string("en", "greeting")
            .unwrap()
            .flatten()
            .as_deref(),
        Some("hello")
    );
}

#[test]
fn test_create_with_unsupported_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("locales");
    let mut localizer = Localizer::new();

    let err = localizer
        .create_localization_file(&dir, "de", "yaml")
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == "yaml"));
    assert!(!dir.exists());
    assert!(!localizer.contains_language("de"));
}

#[test]
fn test_create_twice_is_language_already_exists() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "en", "json")
        .unwrap();

    let err = localizer
        .create_localization_file(tmp.path(), "en", "txt")
        .unwrap_err();
    assert!(matches!(err, Error::LanguageAlreadyExists(ref lang) if lang == "en"));
    assert!(!tmp.path().join("en.txt").exists());
}

#[test]
fn test_create_makes_missing_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a").join("b");
    let mut localizer = Localizer::new();

    localizer.create_localization_file(&dir, "es", "txt").unwrap();
    assert!(dir.join("es.txt").exists());
    assert_eq!(localizer.path_of("es"), Some(dir.join("es.txt").as_path()));
}

#[test]
fn test_create_without_missing_directories_is_recoverable() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("missing");
    let mut localizer =
        Localizer::with_options(LocalizerOptions::new().with_create_missing_dirs(false));

    let outcome = localizer.create_localization_file(&dir, "es", "txt").unwrap();
    assert!(matches!(outcome.skipped_reason(), Some(Error::Io(_))));
    assert!(!localizer.contains_language("es"));
}

#[test]
fn test_create_rejects_invalid_language_code() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    let err = localizer
        .create_localization_file(tmp.path(), "../en", "json")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLanguageCode(_)));
}

#[test]
fn test_delete_unregistered_language_is_a_logged_no_op() {
    let mut localizer = Localizer::new();
    let outcome = localizer.delete_localization_file("xx").unwrap();
    assert!(matches!(
        outcome.skipped_reason(),
        Some(Error::LanguageNotFound(_))
    ));
}

#[test]
fn test_delete_removes_mapping_and_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "en", "json")
        .unwrap();

    assert!(localizer.delete_localization_file("en").unwrap().is_applied());
    assert!(!localizer.contains_language("en"));
    assert!(!tmp.path().join("en.json").exists());
}

#[test]
fn test_delete_with_missing_file_still_unregisters() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .add_localization_file(tmp.path().join("en.json"))
        .unwrap();

    let outcome = localizer.delete_localization_file("en").unwrap();
    assert!(matches!(outcome.skipped_reason(), Some(Error::Io(_))));
    assert!(!localizer.contains_language("en"));
}

#[test]
fn test_strict_delete_of_unregistered_language_is_an_error() {
    let mut localizer = strict_localizer();
    assert!(matches!(
        localizer.delete_localization_file("xx"),
        Err(Error::LanguageNotFound(_))
    ));
}

#[test]
fn test_unknown_language_is_always_an_error() {
    let localizer = Localizer::new();
    assert!(matches!(
        localizer.get_localized_string("en", "greeting"),
        Err(Error::LanguageNotFound(_))
    ));
    assert!(matches!(
        localizer.add_key_value_pair("en", "greeting", "hello"),
        Err(Error::LanguageNotFound(_))
    ));
    assert!(matches!(
        localizer.remove_key_value_pair("en", "greeting"),
        Err(Error::LanguageNotFound(_))
    ));
}

#[test]
fn test_registered_file_with_unsupported_extension() {
    let mut localizer = Localizer::new();
    localizer.add_localization_file("locales/de.yaml").unwrap();
    assert!(localizer.contains_language("de"));
    assert!(matches!(
        localizer.get_localized_string("de", "greeting"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_remove_key_value_pair_removes_the_key() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("fr.txt");
    fs::write(
        &path,
        "greeting: bonjour\nfarewell: au revoir\ngreeting: salut\nGreeting: coucou\n",
    )
    .unwrap();

    let mut localizer = Localizer::new();
    localizer.add_localization_file(&path).unwrap();

    assert!(
        localizer
            .remove_key_value_pair("fr", "greeting")
            .unwrap()
            .is_applied()
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "farewell: au revoir\nGreeting: coucou\n"
    );

    let outcome = localizer.remove_key_value_pair("fr", "missing").unwrap();
    assert!(matches!(
        outcome.skipped_reason(),
        Some(Error::KeyNotFound { .. })
    ));
}

#[test]
fn test_remove_json_key_keeps_others() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("en.json");
    fs::write(&path, r#"{"greeting": "hello", "farewell": "bye"}"#).unwrap();

    let mut localizer = Localizer::new();
    localizer.add_localization_file(&path).unwrap();
    localizer.remove_key_value_pair("en", "greeting").unwrap();

    assert_eq!(
        localizer
            .get_localized_string("en", "greeting")
            .unwrap()
            .flatten(),
        None
    );
    assert_eq!(
        localizer
            .get_localized_string("en", "farewell")
            .unwrap()
            .flatten()
            .as_deref(),
        Some("bye")
    );
}

#[test]
fn test_malformed_json_degrades_to_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("en.json");
    fs::write(&path, "{ not json").unwrap();

    let mut localizer = Localizer::new();
    localizer.add_localization_file(&path).unwrap();

    let outcome = localizer.get_localized_string("en", "greeting").unwrap();
    assert!(matches!(outcome.skipped_reason(), Some(Error::Parse(_))));
    assert_eq!(outcome.flatten(), None);
}

#[test]
fn test_missing_file_degrades_to_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .add_localization_file(tmp.path().join("fr.txt"))
        .unwrap();

    let outcome = localizer.get_localized_string("fr", "greeting").unwrap();
    assert!(matches!(outcome.skipped_reason(), Some(Error::Io(_))));
}

#[test]
fn test_strict_policy_returns_recoverable_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = strict_localizer();
    localizer
        .create_localization_file(tmp.path(), "fr", "txt")
        .unwrap();
    localizer
        .add_key_value_pair("fr", "greeting", "bonjour")
        .unwrap();

    assert!(matches!(
        localizer.add_key_value_pair("fr", "greeting", "salut"),
        Err(Error::DuplicateKey { .. })
    ));
    assert!(matches!(
        localizer.remove_key_value_pair("fr", "missing"),
        Err(Error::KeyNotFound { .. })
    ));

    localizer.set_policy(ErrorPolicy::Lenient);
    assert!(
        localizer
            .remove_key_value_pair("fr", "missing")
            .unwrap()
            .is_skipped()
    );
}

#[test]
fn test_add_localization_file_and_listing() {
    let mut localizer = Localizer::new();
    localizer.add_localization_file("locales/fr.txt").unwrap();
    localizer.add_localization_file("locales/en.json").unwrap();
    localizer.add_localization_file("other/de.json").unwrap();

    assert_eq!(localizer.languages(), vec!["fr", "en", "de"]);
    assert!(localizer.contains_language("en"));
    assert!(!localizer.contains_language("es"));

    let err = localizer
        .add_localization_file("other/en.txt")
        .unwrap_err();
    assert!(matches!(err, Error::LanguageAlreadyExists(_)));
    assert_eq!(localizer.path_of("en"), Some(Path::new("locales/en.json")));
}

#[test]
fn test_remove_localization_file_keeps_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "en", "json")
        .unwrap();

    let entry = localizer.remove_localization_file("en").unwrap();
    assert_eq!(entry.language, "en");
    assert!(entry.path.exists());
    assert!(!localizer.contains_language("en"));
    assert!(localizer.remove_localization_file("en").is_none());
}

#[test]
fn test_from_files() {
    let localizer = Localizer::from_files(["locales/en.json", "locales/fr.txt"]).unwrap();
    assert_eq!(localizer.languages(), vec!["en", "fr"]);
    assert_eq!(localizer.entries()[1].extension(), "txt");

    assert!(matches!(
        Localizer::from_files(["a/en.json", "b/en.txt"]),
        Err(Error::LanguageAlreadyExists(_))
    ));
}

#[test]
fn test_format_handler_passthrough() {
    struct Upper;

    impl FormatHandler for Upper {
        fn extension(&self) -> &str {
            "up"
        }

        fn get_localized_string(&self, _: &Path, key: &str) -> Result<Option<String>, Error> {
            Ok(Some(key.to_uppercase()))
        }

        fn add_key_value_pair(&self, _: &Path, _: &str, _: &str) -> Result<(), Error> {
            Ok(())
        }

        fn remove_key_value_pair(&self, _: &Path, _: &str) -> Result<(), Error> {
            Ok(())
        }
    }

    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    assert!(matches!(
        localizer.create_localization_file(tmp.path(), "en", "up"),
        Err(Error::UnsupportedFormat(_))
    ));

    let id = localizer.add_format_handler(Box::new(Upper));
    assert!(localizer.registry().is_supported("up"));
    localizer
        .create_localization_file(tmp.path(), "en", "up")
        .unwrap();
    assert_eq!(
        localizer
            .get_localized_string("en", "greeting")
            .unwrap()
            .flatten()
            .as_deref(),
        Some("GREETING")
    );

    assert!(localizer.remove_format_handler(id).is_some());
    assert!(matches!(
        localizer.get_localized_string("en", "greeting"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_custom_registry() {
    let mut registry = HandlerRegistry::new();
    registry.register(Box::new(JsonHandler));
    let mut localizer = Localizer::with_registry(registry, LocalizerOptions::default());

    let tmp = tempfile::tempdir().unwrap();
    assert!(
        localizer
            .create_localization_file(tmp.path(), "en", "json")
            .is_ok()
    );
    assert!(matches!(
        localizer.create_localization_file(tmp.path(), "fr", "txt"),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_txt_lookup_is_case_insensitive_through_localizer() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "fr", "txt")
        .unwrap();
    localizer
        .add_key_value_pair("fr", "Greeting", "bonjour")
        .unwrap();

    assert_eq!(
        localizer
            .get_localized_string("fr", "GREETING")
            .unwrap()
            .flatten()
            .as_deref(),
        Some("bonjour")
    );
    assert!(
        localizer
            .add_key_value_pair("fr", "greeting", "salut")
            .unwrap()
            .is_skipped()
    );
}

#[test]
fn test_txt_value_with_surrounding_whitespace_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut localizer = Localizer::new();
    localizer
        .create_localization_file(tmp.path(), "fr", "txt")
        .unwrap();

    assert!(matches!(
        localizer.add_key_value_pair("fr", "greeting", "  bonjour  "),
        Err(Error::InvalidEntry(_))
    ));
    assert_eq!(fs::read_to_string(tmp.path().join("fr.txt")).unwrap(), "");
    assert_eq!(
        localizer
            .get_localized_string("fr", "greeting")
            .unwrap()
            .flatten(),
        None
    );
}
