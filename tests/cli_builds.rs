//! Integration tests for `do-builds`

mod common;

use common::TestEnv;

#[test]
fn test_build_stores_artifact_when_absent() {
    let env = TestEnv::builder()
        .with_unit("svc", "src", "mkdir -p build/svc && echo compiled > build/svc/out.txt")
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    let result = env.run(&["do-builds"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Doing build for svc - YES"));
    assert!(result.stdout.contains("-- Saved svc-"));

    let stored = env.stored_artifacts();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].starts_with("svc-"));
    assert!(stored[0].ends_with(".tar.gz"));
}

#[test]
fn test_build_skipped_when_artifact_exists() {
    let env = TestEnv::builder()
        .with_unit(
            "svc",
            "src",
            "echo run >> build-count.txt && mkdir -p build/svc && cp build-count.txt build/svc/",
        )
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    let first = env.run(&["do-builds"]);
    assert!(first.is_success(), "stderr: {}", first.stderr);

    let second = env.run(&["do-builds"]);
    assert!(second.is_success(), "stderr: {}", second.stderr);
    assert!(second.stdout.contains("Doing build for svc - NO"));

    // the build command ran exactly once
    let count = env.read_deployed_file("build-count.txt");
    assert_eq!(count, "run\n");
    assert_eq!(env.stored_artifacts().len(), 1);
}

#[test]
fn test_force_rebuilds_existing_artifact() {
    let env = TestEnv::builder()
        .with_unit(
            "svc",
            "src",
            "echo run >> build-count.txt && mkdir -p build/svc && cp build-count.txt build/svc/",
        )
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    assert!(env.run(&["do-builds"]).is_success());
    let forced = env.run(&["do-builds", "--force"]);

    assert!(forced.is_success(), "stderr: {}", forced.stderr);
    assert!(forced.stdout.contains("Doing build for svc - YES"));
    assert_eq!(env.read_deployed_file("build-count.txt"), "run\nrun\n");
    // same fingerprint, so still a single stored artifact
    assert_eq!(env.stored_artifacts().len(), 1);
}

#[test]
fn test_failed_build_exits_nonzero_and_stores_nothing() {
    let env = TestEnv::builder()
        .with_unit("svc", "src", "exit 3")
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    let result = env.run(&["do-builds"]);

    assert!(!result.is_success());
    assert_ne!(result.exit_code, 0);
    assert!(result.stdout.contains("Build failed for svc"));
    assert!(result.stderr.contains("failed"));
    assert!(env.stored_artifacts().is_empty());
}

#[test]
fn test_failed_unit_does_not_stop_batch() {
    let env = TestEnv::builder()
        .with_unit("bad", "src", "exit 1")
        .with_unit("good", "src", "mkdir -p build/good && echo ok > build/good/out.txt")
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    let result = env.run(&["do-builds"]);

    // batch exits non-zero but the good unit was still built and stored
    assert!(!result.is_success());
    let stored = env.stored_artifacts();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].starts_with("good-"));
}

#[test]
fn test_filter_builds_only_selected_unit() {
    let env = TestEnv::builder()
        .with_unit("api", "src", "mkdir -p build/api && echo a > build/api/out.txt")
        .with_unit("web", "src", "mkdir -p build/web && echo w > build/web/out.txt")
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    let result = env.run(&["do-builds", "-f", "API"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    let stored = env.stored_artifacts();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].starts_with("api-"));
}

#[test]
fn test_no_units_prints_no_artifacts_found() {
    let env = TestEnv::builder().build();

    let result = env.run(&["do-builds"]);

    assert!(result.is_success());
    assert!(result.stdout.contains("No artifacts found"));
}

#[test]
fn test_changed_source_triggers_new_artifact() {
    let env = TestEnv::builder()
        .with_unit("svc", "src", "mkdir -p build/svc && echo compiled > build/svc/out.txt")
        .with_source_file("src/main.c", "int main() { return 0; }\n")
        .build();

    assert!(env.run(&["do-builds"]).is_success());

    env.write_project_file("src/main.c", "int main() { return 1; }\n");
    env.git_add_all();
    let result = env.run(&["do-builds"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("Doing build for svc - YES"));
    assert_eq!(env.stored_artifacts().len(), 2);
}
