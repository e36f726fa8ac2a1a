//! End-to-end tests of the in-memory pipeline.
//!
//! Each test feeds schema text through [`tdvala_core::generate`] and inspects
//! the rendered output set.

#![allow(non_snake_case)]

use std::path::Path;
use tdvala_core::{EmitSettings, Generation, OutputUnit, SchemaError, generate};

fn run(schema: &str) -> Generation {
    generate(schema, &EmitSettings::default()).unwrap()
}

fn contents<'a>(units: &'a [OutputUnit], path: &str) -> &'a str {
    units
        .iter()
        .find(|unit| unit.path == Path::new(path))
        .map(|unit| unit.contents.as_str())
        .unwrap_or_else(|| panic!("missing {path}"))
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn generate___sync_marker___emits_async_and_sync_methods() {
    let schema = "\
//@class OptionValue @description Represents the value of an option
//@description Represents a string option @value The value of the option
optionValueString value:string = OptionValue;
---functions---
//@description Returns the value of an option by its name. Can be called synchronously @name The name of the option
getOption name:string = OptionValue;
";

    let generation = run(schema);
    let client = contents(&generation.units, "client.vala");

    assert!(client.contains("public async OptionValue get_option (\n        string name\n    )"));
    assert!(client.contains("public OptionValue get_option_sync (\n        string name\n    )"));
    assert_eq!(generation.summary.sync_functions, 1);
}

#[test]
fn generate___second_constructor___extends_family_in_order() {
    let schema = "\
//@class Update @description Contains notifications about data changes
//@description The authorization state has changed
updateAuthorizationState = Update;
//@description An option changed its value @name The option name
updateOption name:string = Update;
";

    let generation = run(schema);
    let update = contents(&generation.units, "objects/update.vala");

    let first = update.find("class TDLib.UpdateAuthorizationState : Update").unwrap();
    let second = update.find("class TDLib.UpdateOption : Update").unwrap();
    assert!(first < second);
    assert_eq!(update.matches("abstract class").count(), 1);
}

#[test]
fn generate___reserved_argument___renamed_everywhere() {
    let schema = "\
//@description A file @id File identifier @type File type
file id:int32 type:string = File;
---functions---
//@description Returns a file @id File identifier
getFile id:int32 = File;
";

    let generation = run(schema);

    let file = contents(&generation.units, "objects/file.vala");
    assert!(file.contains("public int32 id_ { get; set; }"));
    assert!(file.contains("public string type_ { get; set; }"));

    let client = contents(&generation.units, "client.vala");
    assert!(client.contains("        int32 id_\n"));
    assert!(client.contains("@param id_ File identifier"));
}

#[test]
fn generate___may_be_null___only_marked_arguments_nullable() {
    let schema = "\
//@description A chat @title Chat title @photo Chat photo; may be null
chat title:string photo:chatPhoto = Chat;
//@description A chat photo
chatPhoto = ChatPhoto;
";

    let generation = run(schema);
    let chat = contents(&generation.units, "objects/chat.vala");

    assert!(chat.contains("public string title { get; set; }"));
    assert!(chat.contains("public ChatPhoto? photo { get; set; }"));
}

#[test]
fn generate___malformed_token___produces_no_output() {
    let schema = "\
//@description Broken
broken foo = Broken;
";

    let result = generate(schema, &EmitSettings::default());

    assert_eq!(
        result.map(|g| g.units.len()),
        Err(SchemaError::Tokenization {
            line: 2,
            token: "foo".to_string(),
        })
    );
}

#[test]
fn generate___unknown_reference___reports_type_name() {
    let schema = "\
//@description Ok
ok = Ok;
---functions---
//@description Gets a chat @chat_id Chat identifier
getChat chat_id:int53 = Chat;
";

    let error = generate(schema, &EmitSettings::default()).unwrap_err();

    assert!(error.to_string().contains("'Chat'"));
}

#[test]
fn generate___preamble___is_ignored() {
    let schema = "\
double ? = Double;
string ? = String;
vector {t:Type} # [ t ] = Vector t;

//@description Ok
ok = Ok;
";

    let generation = run(schema);

    assert_eq!(generation.summary.types, 1);
    assert_eq!(generation.summary.constructors, 1);
}

#[test]
fn generate___identical_input___byte_identical_output() {
    let schema = "\
//@class Update @description Updates
//@description One @value Value
updateOne value:int53 = Update;
//@description Two @values Values
updateTwo values:vector<string> = Update;
//@description Ok
ok = Ok;
---functions---
//@description Closes
close = Ok;
";

    let first = run(schema);
    let second = run(schema);

    assert_eq!(first.units, second.units);
}
