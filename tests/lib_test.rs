//! Library integration tests.

use kubemask::MaskError;

#[test]
fn error_types_are_public() {
    let err = MaskError::InvalidMaskRule {
        setting: "resource.sensitive.mask.annotations".into(),
        message: "bad".into(),
    };
    assert!(err.to_string().contains("resource.sensitive.mask.annotations"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> kubemask::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use kubemask::cli::{Cli, Commands};

    let cli = Cli::parse_from(["kubemask", "rules", "--json"]);

    if let Commands::Rules(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Rules command");
    }
}

#[test]
fn parse_error_hides_parser_message() {
    let err = kubemask::resource::parse_resources("a: [SECRETVAL", "input.yaml").unwrap_err();
    let text = err.to_string();
    assert!(text.starts_with("Failed to parse resources in input.yaml"));
    assert!(!text.contains("SECRETVAL"));
}
