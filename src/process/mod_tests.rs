use super::*;

#[test]
fn builder_collects_args_and_env() {
    let invocation = Invocation::new("/opt/app/Photoshop")
        .arg("-r")
        .arg("/scripts/batch.jsx")
        .env("ACTION_NAME", "M001MT")
        .timeout(Some(Duration::from_secs(5)));

    assert_eq!(
        invocation.args,
        vec![OsString::from("-r"), OsString::from("/scripts/batch.jsx")]
    );
    assert_eq!(invocation.env_var("ACTION_NAME"), Some("M001MT"));
    assert_eq!(invocation.env_var("MISSING"), None);
    assert_eq!(invocation.timeout, Some(Duration::from_secs(5)));
    assert_eq!(invocation.program_name(), "Photoshop");
}

#[test]
fn success_requires_zero_exit() {
    let ok = ProcessOutput {
        exit_code: Some(0),
        ..ProcessOutput::default()
    };
    let failed = ProcessOutput {
        exit_code: Some(2),
        ..ProcessOutput::default()
    };
    let killed = ProcessOutput::default();

    assert!(ok.success());
    assert!(!failed.success());
    assert!(!killed.success());
}

#[test]
fn into_result_keeps_output_on_failure() {
    let output = ProcessOutput {
        exit_code: Some(4),
        stdout: "partial".to_string(),
        stderr: String::new(),
        duration: Duration::ZERO,
    };

    let err = output.into_result("app").unwrap_err();

    match err {
        BatchError::ProcessExit { code, stdout, .. } => {
            assert_eq!(code, Some(4));
            assert_eq!(stdout, "partial");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn reference_runner_delegates() {
    struct Fixed;
    impl ProcessRunner for Fixed {
        fn run(&self, _: &Invocation) -> Result<ProcessOutput> {
            Ok(ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            })
        }
    }

    fn run_with(runner: impl ProcessRunner) -> bool {
        runner.run(&Invocation::new("x")).unwrap().success()
    }

    assert!(run_with(&Fixed));
}
