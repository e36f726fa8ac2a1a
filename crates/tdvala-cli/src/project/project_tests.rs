#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn valid_project() -> Project {
    Project {
        generator: EmitSettings::default().with_author("Jane Doe"),
        paths: PathsSection {
            schema: PathBuf::from("td_api.tl"),
            output: PathBuf::from("lib"),
            support: None,
        },
    }
}

// Project parsing tests

#[test]
fn Project___from_str___parses_valid_toml() {
    let toml = r#"
[generator]
namespace = "Telegram"
author = "Jane Doe"
year = 2024
client_class = "TelegramClient"

[paths]
schema = "td_api.tl"
output = "lib"
support = "support"
"#;

    let project = Project::from_str(toml).unwrap();

    assert_eq!(project.generator.namespace, "Telegram");
    assert_eq!(project.generator.author, "Jane Doe");
    assert_eq!(project.generator.year, Some(2024));
    assert_eq!(project.generator.client_class, "TelegramClient");
    assert_eq!(project.paths.schema, PathBuf::from("td_api.tl"));
    assert_eq!(project.paths.support, Some(PathBuf::from("support")));
}

#[test]
fn Project___from_str___fills_defaults() {
    let toml = r#"
[generator]
author = "Jane Doe"

[paths]
schema = "td_api.tl"
output = "lib"
"#;

    let project = Project::from_str(toml).unwrap();

    assert_eq!(project.generator.namespace, "TDLib");
    assert_eq!(project.generator.dispatcher_class, "RequestsManager");
    assert_eq!(project.generator.root_class, "TDObject");
    assert_eq!(project.paths.support, None);
}

#[test]
fn Project___from_str___rejects_malformed_toml() {
    assert!(Project::from_str("[generator\nnamespace = ").is_err());
}

#[test]
fn Project___from_file___missing_file_is_error() {
    let result = Project::from_file("/nonexistent/tdvala.toml");

    assert!(result.is_err());
}

// Override tests

#[test]
fn Project___apply___command_line_wins() {
    let project = valid_project().apply(Overrides {
        output: Some(PathBuf::from("out")),
        namespace: Some("Td".to_string()),
        year: Some(2030),
        ..Overrides::default()
    });

    assert_eq!(project.paths.output, PathBuf::from("out"));
    assert_eq!(project.paths.schema, PathBuf::from("td_api.tl"));
    assert_eq!(project.generator.namespace, "Td");
    assert_eq!(project.generator.author, "Jane Doe");
    assert_eq!(project.generator.year, Some(2030));
}

#[test]
fn Project___settings___defaults_year() {
    let settings = valid_project().settings();

    assert!(settings.year.is_some());
}

#[test]
fn Project___settings___keeps_explicit_year() {
    let mut project = valid_project();
    project.generator.year = Some(2024);

    assert_eq!(project.settings().year, Some(2024));
}

// Project validation tests

#[test]
fn Project___validate___accepts_valid_project() {
    assert!(valid_project().validate().is_ok());
}

#[test]
fn Project___validate___accepts_empty_author() {
    let mut project = valid_project();
    project.generator.author = "  ".to_string();

    assert!(project.validate().is_ok());
}

#[test]
fn Project___validate___rejects_empty_license() {
    let mut project = valid_project();
    project.generator.license = String::new();

    assert!(project.validate().is_err());
}

#[test]
fn Project___validate___rejects_empty_namespace() {
    let mut project = valid_project();
    project.generator.namespace = String::new();

    assert!(project.validate().is_err());
}

#[test_case("TD Lib")]
#[test_case("9Lives")]
#[test_case("TD.Lib")]
fn Project___validate___rejects_non_identifier_namespace(namespace: &str) {
    let mut project = valid_project();
    project.generator.namespace = namespace.to_string();

    assert!(project.validate().is_err());
}

#[test]
fn Project___validate___rejects_non_identifier_class() {
    let mut project = valid_project();
    project.generator.client_class = "My-Client".to_string();

    let error = project.validate().unwrap_err();

    assert!(error.to_string().contains("client class"));
}

#[test]
fn Project___validate___rejects_empty_schema_path() {
    let mut project = valid_project();
    project.paths.schema = PathBuf::new();

    assert!(project.validate().is_err());
}

#[test]
fn Project___validate___rejects_empty_output_path() {
    let mut project = valid_project();
    project.paths.output = PathBuf::new();

    assert!(project.validate().is_err());
}

#[test]
fn Project___validate___rejects_year_out_of_range() {
    let mut project = valid_project();
    project.generator.year = Some(12);

    assert!(project.validate().is_err());
}

#[test_case("TDLib", true)]
#[test_case("_private", true)]
#[test_case("Client2", true)]
#[test_case("", false)]
#[test_case("2Client", false)]
#[test_case("Requests Manager", false)]
fn is_identifier___classifies(name: &str, expected: bool) {
    assert_eq!(is_identifier(name), expected);
}
