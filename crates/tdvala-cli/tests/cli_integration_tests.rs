//! Integration tests for the tdvala binary.
//!
//! Runs the built binary against schemas written to temporary directories.

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SCHEMA: &str = "\
double ? = Double;
string ? = String;

//@class Update @description Contains notifications about data changes
//@description An option changed its value @name The option name
updateOption name:string = Update;
//@description An object of this type is returned on a successful function call
ok = Ok;
---functions---
//@description Returns the current option. Can be called synchronously @name The name of the option
getOption name:string = Ok;
";

fn tdvala(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tdvala"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_schema(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("td_api.tl");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

// =============================================================================
// generate
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn generate___flags_only___writes_output_tree() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, SCHEMA);

        let output = tdvala(
            &[
                "generate", "--schema", &schema, "--output", "lib", "--author", "Jane Doe",
                "--year", "2024",
            ],
            temp.path(),
        );

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let lib = temp.path().join("lib");
        assert!(lib.join("objects/update.vala").is_file());
        assert!(lib.join("functions/get-option.vala").is_file());
        let dispatcher = fs::read_to_string(lib.join("requests-manager.vala")).unwrap();
        assert!(dispatcher.contains("case \"updateOption\":"));
    }

    #[test]
    fn generate___malformed_schema___fails_without_output() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, "//@description Broken\nbroken foo = Broken;\n");

        let output = tdvala(
            &["generate", "--schema", &schema, "--output", "lib", "--author", "Jane Doe"],
            temp.path(),
        );

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("'foo'"));
        assert!(!temp.path().join("lib").exists());
    }

    #[test]
    fn generate___project_file_in_working_directory___is_used() {
        let temp = TempDir::new().unwrap();
        write_schema(&temp, SCHEMA);
        fs::write(
            temp.path().join("tdvala.toml"),
            "[generator]\nnamespace = \"Td\"\nauthor = \"Jane Doe\"\n\n[paths]\nschema = \"td_api.tl\"\noutput = \"out\"\n",
        )
        .unwrap();

        let output = tdvala(&["generate"], temp.path());

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let ok = fs::read_to_string(temp.path().join("out/objects/ok.vala")).unwrap();
        assert!(ok.contains("public class Td.Ok : TDObject {"));
    }
}

// =============================================================================
// check and inspect
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___valid_project___reports_counts() {
        let temp = TempDir::new().unwrap();
        write_schema(&temp, SCHEMA);
        fs::write(
            temp.path().join("tdvala.toml"),
            "[generator]\nauthor = \"Jane Doe\"\n\n[paths]\nschema = \"td_api.tl\"\noutput = \"out\"\n",
        )
        .unwrap();

        let output = tdvala(&["check"], temp.path());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("✓ Functions: 1 (1 synchronous)"));
        assert!(stdout.contains("Project is valid!"));
    }

    #[test]
    fn check___missing_project___fails() {
        let temp = TempDir::new().unwrap();

        let output = tdvala(&["check"], temp.path());

        assert!(!output.status.success());
    }

    #[test]
    fn inspect___json___prints_model() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, SCHEMA);

        let output = tdvala(&["inspect", &schema, "--json"], temp.path());

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["functions"]["getOption"]["name"], "get_option");
    }

    #[test]
    fn inspect___summary___lists_families() {
        let temp = TempDir::new().unwrap();
        let schema = write_schema(&temp, SCHEMA);

        let output = tdvala(&["inspect", &schema, "--log-level", "off"], temp.path());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(output.status.success());
        assert!(stdout.contains("Update [updateOption]"));
    }
}
