//! Library integration tests.

use bstrap::BstrapError;

#[test]
fn error_types_are_public() {
    let err = BstrapError::UnsupportedInterpreter {
        required: "3.9".into(),
        found: "3.7.17".into(),
    };
    assert!(err.to_string().contains("3.7.17"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn install_failure_keeps_installer_status() {
    let err = BstrapError::InstallFailed {
        package: "psutil".into(),
        code: Some(2),
    };
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> bstrap::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use bstrap::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["bstrap", "--quiet", "check"]);
    assert!(cli.quiet);
    assert!(matches!(cli.command, Some(Commands::Check(_))));
}

#[test]
fn builtin_registry_is_public() {
    use bstrap::requirements::{Detection, ToolRegistry};

    let registry = ToolRegistry::builtin();
    let names: Vec<_> = registry.tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["git-lfs", "bazel", "rsync"]);
    assert_eq!(
        registry.get("git-lfs").unwrap().detection,
        Detection::version_command("git", &["lfs", "version"])
    );
}

#[test]
fn config_defaults_reproduce_builtin_plan() {
    use bstrap::config::BstrapConfig;
    use bstrap::requirements::default_dependencies;
    use bstrap::runner::PreflightPlan;

    let plan = PreflightPlan::from_config(&BstrapConfig::default()).unwrap();
    assert_eq!(plan.dependencies, default_dependencies());
    assert_eq!(plan.version.to_string(), "3.9");
}

#[test]
fn config_loading_from_project_dir() {
    use bstrap::config::{load_config, validate};
    use std::fs;
    use tempfile::TempDir;

    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".bstrap");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.yml"),
        "dependencies:\n  - click\n  - { module: yaml, package: PyYAML }\n",
    )
    .unwrap();
    fs::write(dir.join("config.local.yml"), "python:\n  executable: python3.12\n").unwrap();

    let config = load_config(temp.path(), None).unwrap();
    validate(&config).unwrap();

    let deps = config.dependencies.unwrap();
    assert_eq!(deps[1].module, "yaml");
    assert_eq!(deps[1].package, "PyYAML");
    assert_eq!(config.python.executable.as_deref(), Some("python3.12"));
}
