use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use lisvg_cli::{Args, run};

/// Demos live at the workspace root, not inside the crate.
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .sxd files from a directory
fn collect_sxd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("sxd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        direction: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_sxd_files(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, &output_path)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("SVG should be written");
                assert!(svg.contains("<svg"), "{} produced no SVG", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_sxd_files(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} wrote output despite failing",
            demo_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_default_output_is_next_to_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("graph.sxd");
    fs::write(&input, "(diagram (nodes (id a) (id b)) (edges (a b)))").unwrap();

    let args = Args {
        output: None,
        ..args_for(&input, Path::new("unused"))
    };
    run(&args).expect("Pipeline should succeed");

    let svg = fs::read_to_string(temp_dir.path().join("graph.svg")).unwrap();
    assert!(svg.contains("</svg>"));
}

#[test]
fn e2e_config_and_direction_flag() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("graph.sxd");
    let config = temp_dir.path().join("config.toml");
    let output = temp_dir.path().join("graph.svg");
    fs::write(&input, "(diagram (nodes (id a) (id b)) (edges (a b)))").unwrap();
    fs::write(&config, "[style]\nbackground_color = \"#fafafa\"\n").unwrap();

    let args = Args {
        config: Some(config.to_string_lossy().to_string()),
        direction: Some(lisvg::direction::Direction::LeftToRight),
        ..args_for(&input, &output)
    };
    run(&args).expect("Pipeline should succeed");

    // Two 100x50 nodes side by side plus padding and margin.
    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 400 170""#));
}

#[test]
fn e2e_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("graph.sxd");
    fs::write(&input, "(diagram (nodes (id a)))").unwrap();

    let args = Args {
        config: Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string()),
        ..args_for(&input, &temp_dir.path().join("graph.svg"))
    };
    assert!(run(&args).is_err());
}
