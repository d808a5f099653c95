//! Argument-parsing tests for the CLI.
//!
//! These cover flag parsing, the [`CliConfig`](crate::cli::CliConfig)
//! mapping, and the required/conflicting argument rules. Command execution
//! against a real catalog is exercised by the `assert_cmd` integration tests,
//! which run the binary with stdin piped and no network access.

#[cfg(test)]
mod cli_tests {
    use crate::cli::{Cli, Commands};
    use crate::constants::DEFAULT_CATALOG_REPO;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // --help is surfaced as a special parse error
        let cli = Cli::try_parse_from(["helmweave", "--help"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["helmweave", "list"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["helmweave", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_quiet_flag() {
        let cli = Cli::try_parse_from(["helmweave", "-q", "list"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_no_progress_flag() {
        let cli = Cli::try_parse_from(["helmweave", "--no-progress", "list"]).unwrap();
        assert!(cli.no_progress);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let cli = Cli::try_parse_from(["helmweave", "--verbose", "--quiet", "list"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_build_config_default_is_info() {
        let cli = Cli::try_parse_from(["helmweave", "list"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(!config.no_progress);
    }

    #[test]
    fn test_build_config_verbose_is_debug() {
        let cli = Cli::try_parse_from(["helmweave", "--verbose", "list"]).unwrap();
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_build_config_quiet_disables_logging() {
        let cli = Cli::try_parse_from(["helmweave", "--quiet", "list"]).unwrap();
        let config = cli.build_config();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_list_accepts_optional_module() {
        let cli = Cli::try_parse_from(["helmweave", "list"]).unwrap();
        let Commands::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert!(cmd.module.is_none());

        let cli = Cli::try_parse_from(["helmweave", "list", "egov-core"]).unwrap();
        let Commands::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.module.as_deref(), Some("egov-core"));
    }

    #[test]
    fn test_list_uses_default_repo() {
        let cli = Cli::try_parse_from(["helmweave", "list"]).unwrap();
        let Commands::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.source.repo, DEFAULT_CATALOG_REPO);
    }

    #[test]
    fn test_compose_requires_env_and_secrets_files() {
        assert!(Cli::try_parse_from(["helmweave", "compose"]).is_err());
        assert!(
            Cli::try_parse_from(["helmweave", "compose", "--env-file", "envs/dev.yaml"]).is_err()
        );
        assert!(
            Cli::try_parse_from([
                "helmweave",
                "compose",
                "--env-file",
                "envs/dev.yaml",
                "--secrets-file",
                "secrets/dev.yaml",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_compose_collects_modules_and_versions() {
        let cli = Cli::try_parse_from([
            "helmweave",
            "compose",
            "--env-file",
            "envs/dev.yaml",
            "--secrets-file",
            "secrets/dev.yaml",
            "--modules",
            "egov-core",
            "egov-dss",
            "--versions",
            "v1.7.yaml",
            "--out",
            "merged.yaml",
        ])
        .unwrap();

        let Commands::Compose(cmd) = cli.command else {
            panic!("expected compose command");
        };
        assert_eq!(cmd.modules, vec!["egov-core", "egov-dss"]);
        assert_eq!(cmd.versions, vec!["v1.7.yaml"]);
        assert_eq!(cmd.out.as_deref(), Some(std::path::Path::new("merged.yaml")));
    }

    #[test]
    fn test_compose_repo_and_branch_options() {
        let cli = Cli::try_parse_from([
            "helmweave",
            "compose",
            "--env-file",
            "e.yaml",
            "--secrets-file",
            "s.yaml",
            "--repo",
            "myorg/my-charts",
            "--branch",
            "release-1.2",
        ])
        .unwrap();

        let Commands::Compose(cmd) = cli.command else {
            panic!("expected compose command");
        };
        assert_eq!(cmd.source.repo, "myorg/my-charts");
        assert_eq!(cmd.source.branch.as_deref(), Some("release-1.2"));
    }

    #[test]
    fn test_deploy_flags() {
        let cli = Cli::try_parse_from([
            "helmweave",
            "deploy",
            "--env-file",
            "e.yaml",
            "--secrets-file",
            "s.yaml",
            "--diff",
            "-y",
        ])
        .unwrap();

        let Commands::Deploy(cmd) = cli.command else {
            panic!("expected deploy command");
        };
        assert!(cmd.diff);
        assert!(cmd.yes);
        assert_eq!(cmd.compose.env_file, "e.yaml");
    }

    #[test]
    fn test_deploy_defaults_to_apply_with_confirmation() {
        let cli = Cli::try_parse_from([
            "helmweave",
            "deploy",
            "--env-file",
            "e.yaml",
            "--secrets-file",
            "s.yaml",
        ])
        .unwrap();

        let Commands::Deploy(cmd) = cli.command else {
            panic!("expected deploy command");
        };
        assert!(!cmd.diff);
        assert!(!cmd.yes);
    }
}
