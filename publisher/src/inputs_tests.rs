//! Tests for action input resolution.

use super::*;
use crate::test_utils::{HostEvent, RecordingHost};
use rstest::rstest;
use std::collections::HashMap;

fn resolve(cli: &Cli, pairs: &[(&str, &str)]) -> (PublishInputs, RecordingHost) {
    let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
    let mut host = RecordingHost::default();
    let inputs = PublishInputs::resolve(
        cli,
        |name| vars.get(name).map(|value| (*value).to_owned()),
        &mut host,
    )
    .expect("resolve");
    (inputs, host)
}

const RUNNER: &[(&str, &str)] = &[
    ("RUNNER_WORKSPACE", "/runner/work"),
    ("RUNNER_TEMP", "/runner/temp"),
];

#[rstest]
#[case::plain("accountName", "INPUT_ACCOUNTNAME")]
#[case::mixed_case("SymbolsFolder", "INPUT_SYMBOLSFOLDER")]
#[case::spaces("search pattern", "INPUT_SEARCH_PATTERN")]
fn input_variable_upper_cases_and_replaces_spaces(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(input_variable(name), expected);
}

#[test]
fn action_inputs_are_read_and_trimmed() {
    let (inputs, _) = resolve(
        &Cli::default(),
        &[
            ("INPUT_ACCOUNTNAME", "  contoso "),
            ("INPUT_SYMBOLSERVICEURL", "https://symbols.example.test/"),
            ("INPUT_PERSONALACCESSTOKEN", "pat\n"),
            ("INPUT_SYMBOLSFOLDER", "/work/repo"),
            ("INPUT_SEARCHPATTERN", "**/*.pdb\n**/*.sym"),
            ("RUNNER_TEMP", "/runner/temp"),
        ],
    );

    assert_eq!(inputs.account_name.as_deref(), Some("contoso"));
    assert_eq!(inputs.service_url, "https://symbols.example.test");
    assert_eq!(
        inputs.credential.as_ref().map(Credential::expose),
        Some("pat")
    );
    assert_eq!(inputs.symbols_folder, Utf8PathBuf::from("/work/repo"));
    assert_eq!(inputs.search_pattern, "**/*.pdb\n**/*.sym");
    assert_eq!(inputs.manifest_dir, Utf8PathBuf::from("/runner/temp"));
    assert!(!inputs.dry_run);
}

#[test]
fn token_is_marked_secret_on_read() {
    let (_, host) = resolve(
        &Cli::default(),
        &[("INPUT_PERSONALACCESSTOKEN", "hunter2"), ("RUNNER_TEMP", "/t")],
    );
    assert_eq!(host.events, [HostEvent::Secret("hunter2".to_owned())]);
}

#[test]
fn absent_token_registers_no_secret() {
    let (inputs, host) = resolve(&Cli::default(), RUNNER);
    assert!(inputs.credential.is_none());
    assert!(host.events.is_empty());
}

#[test]
fn blank_inputs_count_as_absent() {
    let (inputs, _) = resolve(
        &Cli::default(),
        &[
            ("INPUT_ACCOUNTNAME", "   "),
            ("INPUT_PERSONALACCESSTOKEN", ""),
            ("INPUT_SEARCHPATTERN", " \n "),
            ("RUNNER_WORKSPACE", "/runner/work"),
            ("RUNNER_TEMP", "/runner/temp"),
        ],
    );

    assert!(inputs.account_name.is_none());
    assert!(inputs.credential.is_none());
    assert_eq!(inputs.search_pattern, DEFAULT_SEARCH_PATTERN);
}

#[test]
fn defaults_apply_when_nothing_is_supplied() {
    let (inputs, _) = resolve(&Cli::default(), RUNNER);

    assert_eq!(inputs.service_url, "");
    assert_eq!(inputs.symbols_folder, Utf8PathBuf::from("/runner/work"));
    assert_eq!(inputs.search_pattern, DEFAULT_SEARCH_PATTERN);
    assert_eq!(inputs.manifest_dir, Utf8PathBuf::from("/runner/temp"));
}

#[test]
fn symbols_folder_falls_back_to_current_directory() {
    let (inputs, _) = resolve(&Cli::default(), &[("RUNNER_TEMP", "/runner/temp")]);
    let cwd = std::env::current_dir().expect("current dir");
    assert_eq!(inputs.symbols_folder.as_std_path(), cwd);
}

#[test]
fn manifest_dir_falls_back_to_system_temp() {
    let (inputs, _) = resolve(&Cli::default(), &[("RUNNER_WORKSPACE", "/w")]);
    assert_eq!(inputs.manifest_dir.as_std_path(), std::env::temp_dir());
}

#[test]
fn command_line_overrides_action_inputs() {
    let cli = Cli {
        account_name: Some("fabrikam".to_owned()),
        service_url: Some("https://cli.example.test".to_owned()),
        symbols_folder: Some(Utf8PathBuf::from("/cli/folder")),
        search_pattern: vec!["a/*.pdb".to_owned(), "b/*.pdb".to_owned()],
        symbol_tool: Some(Utf8PathBuf::from("/opt/symbol.exe")),
        dry_run: true,
        verbosity: 0,
    };
    let (inputs, _) = resolve(
        &cli,
        &[
            ("INPUT_ACCOUNTNAME", "contoso"),
            ("INPUT_SYMBOLSERVICEURL", "https://input.example.test"),
            ("INPUT_SYMBOLSFOLDER", "/input/folder"),
            ("INPUT_SEARCHPATTERN", "**/*.pdb"),
            ("RUNNER_TEMP", "/runner/temp"),
        ],
    );

    assert_eq!(inputs.account_name.as_deref(), Some("fabrikam"));
    assert_eq!(inputs.service_url, "https://cli.example.test");
    assert_eq!(inputs.symbols_folder, Utf8PathBuf::from("/cli/folder"));
    assert_eq!(inputs.search_pattern, "a/*.pdb\nb/*.pdb");
    assert_eq!(inputs.symbol_tool, Some(Utf8PathBuf::from("/opt/symbol.exe")));
    assert!(inputs.dry_run);
}

#[test]
fn require_account_names_the_missing_input() {
    let (inputs, _) = resolve(&Cli::default(), RUNNER);
    let err = inputs.require_account().expect_err("account missing");
    assert_eq!(err.to_string(), "Input required and not supplied: accountName");
}

#[test]
fn require_credential_names_the_missing_input() {
    let (inputs, _) = resolve(&Cli::default(), RUNNER);
    let err = inputs.require_credential().expect_err("token missing");
    assert_eq!(
        err.to_string(),
        "Input required and not supplied: personalAccessToken"
    );
}

#[rstest]
#[case::empty_base("", "/contoso")]
#[case::plain("https://symbols.example.test", "https://symbols.example.test/contoso")]
#[case::trailing_slash("https://symbols.example.test/", "https://symbols.example.test/contoso")]
fn server_url_appends_account(#[case] base: &str, #[case] expected: &str) {
    let (inputs, _) = resolve(
        &Cli::default(),
        &[
            ("INPUT_SYMBOLSERVICEURL", base),
            ("RUNNER_WORKSPACE", "/w"),
            ("RUNNER_TEMP", "/t"),
        ],
    );
    assert_eq!(inputs.server_url("contoso"), expected);
}

#[test]
fn from_env_reads_process_environment() {
    temp_env::with_vars(
        [
            ("INPUT_ACCOUNTNAME", Some("contoso")),
            ("INPUT_PERSONALACCESSTOKEN", Some("pat")),
            ("INPUT_SYMBOLSERVICEURL", None),
            ("INPUT_SYMBOLSFOLDER", None),
            ("INPUT_SEARCHPATTERN", None),
            ("RUNNER_WORKSPACE", Some("/runner/work")),
            ("RUNNER_TEMP", Some("/runner/temp")),
        ],
        || {
            let mut host = RecordingHost::default();
            let inputs = PublishInputs::from_env(&Cli::default(), &mut host).expect("resolve");
            assert_eq!(inputs.require_account().expect("account"), "contoso");
            assert_eq!(inputs.require_credential().expect("token").expose(), "pat");
            assert_eq!(inputs.symbols_folder, Utf8PathBuf::from("/runner/work"));
        },
    );
}
