//! Integration tests for vasmup

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn vasmup(dir: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("vasmup");
        cmd.current_dir(dir)
            .env_remove("VASMUP_CONFIG")
            .env_remove("CI")
            .arg("--no-local");
        cmd
    }

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("prog.asm"), "  .org $8000\n  lda #$01\n").unwrap();
        temp
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Stand-in assembler: records its arguments, optionally writes symbols, exits with `code`
    #[cfg(unix)]
    fn install_fake_assembler(dir: &Path, code: i32) {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" > args.txt\n\
             for arg in \"$@\"; do [ \"$arg\" = \"-debug\" ] && : > symbols.dbg; done\n\
             echo \"fake vasm\"\n\
             exit {}\n",
            code
        );
        let path = dir.join("vasm6502_oldstyle");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    fn recorded_args(dir: &Path) -> String {
        std::fs::read_to_string(dir.join("args.txt")).unwrap().trim().to_string()
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        vasmup(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("INPUT_PATH"))
            .stdout(predicate::str::contains("--debug"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        vasmup(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("vasmup"));
    }

    #[test]
    fn missing_input_fails() {
        let temp = TempDir::new().unwrap();
        vasmup(temp.path())
            .arg("nope.asm")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Input file not found: nope.asm"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let temp = project();
        vasmup(temp.path())
            .args(["--config", "absent.toml", "prog.asm"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration file not found"));
    }

    #[test]
    fn declined_build_exits_cleanly_without_changes() {
        let temp = project();
        let before = entries(temp.path());

        vasmup(temp.path())
            .arg("prog.asm")
            .assert()
            .success()
            .stdout(predicate::str::contains("vasm6502_oldstyle not found"))
            .stdout(predicate::str::contains("Compiled").not());

        assert_eq!(entries(temp.path()), before);
    }

    #[cfg(unix)]
    #[test]
    fn cached_binary_is_invoked_with_suffix_output() {
        let temp = project();
        install_fake_assembler(temp.path(), 0);

        vasmup(temp.path())
            .arg("prog.asm")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Compiled 'prog.asm' to 'prog.asm.out'",
            ));

        assert_eq!(
            recorded_args(temp.path()),
            "-Fbin -dotdir prog.asm -o prog.asm.out"
        );
        assert!(!temp.path().join("vasm-main").exists());
    }

    #[cfg(unix)]
    #[test]
    fn debug_flag_is_forwarded() {
        let temp = project();
        install_fake_assembler(temp.path(), 0);

        vasmup(temp.path())
            .args(["--debug", "prog.asm"])
            .assert()
            .success()
            .stdout(predicate::str::contains("with debug symbols"));

        assert!(recorded_args(temp.path()).ends_with("-debug"));
    }

    #[cfg(unix)]
    #[test]
    fn fixed_name_with_always_on_symbols() {
        let temp = project();
        install_fake_assembler(temp.path(), 0);

        vasmup(temp.path())
            .args(["--naming", "fixed-name", "--symbols", "always-on", "prog.asm"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Compiled 'prog.asm' to 'a.out' and debug symbols at 'symbols.dbg'",
            ));

        assert!(temp.path().join("symbols.dbg").is_file());
        assert_eq!(
            recorded_args(temp.path()),
            "-Fbin -dotdir prog.asm -o a.out -debug"
        );
    }

    #[cfg(unix)]
    #[test]
    fn policies_from_explicit_config() {
        let temp = project();
        install_fake_assembler(temp.path(), 0);
        std::fs::write(
            temp.path().join("asm.toml"),
            "[assembler]\noutput_naming = \"fixed-name\"\noutput_name = \"rom.bin\"\n",
        )
        .unwrap();

        vasmup(temp.path())
            .args(["--config", "asm.toml", "prog.asm"])
            .assert()
            .success()
            .stdout(predicate::str::contains("to 'rom.bin'"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_assembler_is_reported() {
        let temp = project();
        install_fake_assembler(temp.path(), 1);

        vasmup(temp.path())
            .arg("prog.asm")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Compiled").not())
            .stderr(predicate::str::contains("Assembling prog.asm failed (exit code 1)"));
    }
}
