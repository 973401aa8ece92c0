use std::path::PathBuf;

use modgen::answers::Answers;
use modgen::descriptor::{Category, License, ModuleKind};
use modgen::error::Error;
use modgen::questionnaire::{
    ask_kind, ask_module_directory, ask_rawname, complete_descriptor, confirm_descriptor,
    normalize_rawname, summary, validate_rawname,
};

mod common;

use common::ScriptedPrompter;

#[test]
fn test_defaults_from_enter_everywhere() {
    let prompter = ScriptedPrompter::new().with_inputs(&["", "", ""]);
    let preset = Answers::default();

    let kind = ask_kind(&prompter, &preset).unwrap();
    let rawname = ask_rawname(&prompter, &preset).unwrap();
    let descriptor = complete_descriptor(&prompter, &preset, kind, rawname).unwrap();

    assert_eq!(descriptor, common::descriptor(ModuleKind::Both));
    assert_eq!(prompter.prompts.borrow().len(), 6);
}

#[test]
fn test_scripted_answers() {
    let prompter = ScriptedPrompter::new()
        .with_inputs(&["  Parking_Lot ", "1.2.3", "Parks calls"])
        .with_selections(&[0, 3, 1]);
    let preset = Answers::default();

    let kind = ask_kind(&prompter, &preset).unwrap();
    let rawname = ask_rawname(&prompter, &preset).unwrap();
    let descriptor = complete_descriptor(&prompter, &preset, kind, rawname).unwrap();

    assert_eq!(descriptor.kind(), ModuleKind::PrimaryOnly);
    assert_eq!(descriptor.rawname(), "parking_lot");
    assert_eq!(descriptor.version(), "1.2.3");
    assert_eq!(descriptor.description(), "Parks calls");
    assert_eq!(descriptor.license(), License::Mit);
    assert_eq!(descriptor.category(), Category::Applications);
}

#[test_log::test]
fn test_invalid_rawname_is_asked_again() {
    let prompter =
        ScriptedPrompter::new().with_inputs(&["hello world", "hello-world", "9lives", "hello"]);

    let rawname = ask_rawname(&prompter, &Answers::default()).unwrap();

    assert_eq!(rawname, "hello");
    assert_eq!(prompter.prompts.borrow().len(), 4);
}

#[test]
fn test_preset_rawname_is_normalized() {
    let prompter = ScriptedPrompter::new();
    let preset = Answers { rawname: Some("  HelloWorld ".to_string()), ..Default::default() };

    assert_eq!(ask_rawname(&prompter, &preset).unwrap(), "helloworld");
    assert!(prompter.prompts.borrow().is_empty());
}

#[test]
fn test_invalid_preset_rawname_is_rejected() {
    let prompter = ScriptedPrompter::new();
    let preset = Answers { rawname: Some("hello-world".to_string()), ..Default::default() };

    let result = ask_rawname(&prompter, &preset);

    assert!(matches!(result, Err(Error::ValidationError(_))));
    assert!(prompter.prompts.borrow().is_empty());
}

#[test]
fn test_validate_rawname() {
    assert!(validate_rawname("helloworld").is_ok());
    assert!(validate_rawname("hello_world2").is_ok());
    assert!(validate_rawname("").is_err());
    assert!(validate_rawname("_hello").is_err());
    assert!(validate_rawname("hello world").is_err());
    assert!(validate_rawname("héllo").is_err());
    assert_eq!(normalize_rawname(" ABC "), "abc");
}

#[test]
fn test_presets_skip_questions() {
    let prompter = ScriptedPrompter::new();
    let preset = Answers {
        kind: Some(ModuleKind::SecondaryOnly),
        rawname: Some("widgets".to_string()),
        module_directory: Some(PathBuf::from("/srv/modules")),
        version: Some("2.0".to_string()),
        description: Some("Widgets".to_string()),
        license: Some(License::Gplv3),
        category: Some(Category::Reports),
    };

    let kind = ask_kind(&prompter, &preset).unwrap();
    let rawname = ask_rawname(&prompter, &preset).unwrap();
    let dir = ask_module_directory(&prompter, &preset).unwrap();
    let descriptor = complete_descriptor(&prompter, &preset, kind, rawname).unwrap();

    assert_eq!(dir, PathBuf::from("/srv/modules"));
    assert_eq!(descriptor.kind(), ModuleKind::SecondaryOnly);
    assert_eq!(descriptor.license(), License::Gplv3);
    assert!(prompter.prompts.borrow().is_empty());
}

#[test]
fn test_module_directory_default() {
    let prompter = ScriptedPrompter::new().with_inputs(&[""]);
    let dir = ask_module_directory(&prompter, &Answers::default()).unwrap();
    assert_eq!(dir, PathBuf::from("/var/www/html/admin/modules"));
}

#[test]
fn test_summary_lists_every_answer() {
    let text = summary(&common::descriptor(ModuleKind::Both));

    assert!(text.starts_with("Generate a module with the following information?\n"));
    assert!(text.contains("Module type: Both\n"));
    assert!(text.contains("Module rawname: helloworld\n"));
    assert!(text.contains("Module version: 14.0.1\n"));
    assert!(text.contains("Module description: Generated Module\n"));
    assert!(text.contains("Module category: Connectivity\n"));
    assert!(text.contains("Module license: AGPLv3\n"));
}

#[test]
fn test_confirm_descriptor() {
    let descriptor = common::descriptor(ModuleKind::PrimaryOnly);

    let skipped = ScriptedPrompter::new();
    assert!(confirm_descriptor(&skipped, &descriptor, true).unwrap());
    assert!(skipped.prompts.borrow().is_empty());

    let declined = ScriptedPrompter::new().with_confirmations(&[false]);
    assert!(!confirm_descriptor(&declined, &descriptor, false).unwrap());

    let accepted = ScriptedPrompter::new().with_confirmations(&[true]);
    assert!(confirm_descriptor(&accepted, &descriptor, false).unwrap());
}
