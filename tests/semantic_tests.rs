// Semantic analysis and driver tests over the demo programs

use minic::semantic::{SemanticError, Type};
use minic::{compile, ColorChoice, CompileError, Driver, DriverConfig, Stage};
use std::fs;
use std::path::Path;

#[test]
fn test_semantic_errors_demo() {
    let path = Path::new("demos/semantic_errors.mc");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let analysis = compile(&source).expect("Front end failed");
    let lines: Vec<usize> = analysis
        .diagnostics
        .iter()
        .map(|d| d.location().line)
        .collect();
    assert_eq!(lines, vec![3, 14, 15, 16, 17, 18, 19, 20, 21]);

    let d = &analysis.diagnostics;
    assert!(matches!(&d[0], SemanticError::DuplicateVariable { name, .. } if name == "x"));
    assert!(matches!(
        d[1],
        SemanticError::IncompatibleInitializer {
            expected: Type::Int,
            found: Type::Float,
            ..
        }
    ));
    assert!(matches!(
        d[2],
        SemanticError::IncompatibleAssignment {
            found: Type::Void,
            ..
        }
    ));
    assert!(matches!(&d[3], SemanticError::UndeclaredVariable { name, .. } if name == "b"));
    assert!(matches!(
        d[4],
        SemanticError::ArgumentCount {
            expected: 1,
            found: 2,
            ..
        }
    ));
    assert!(matches!(d[5], SemanticError::IncompatibleArgument { position: 1, .. }));
    assert!(matches!(&d[6], SemanticError::UndeclaredFunction { name, .. } if name == "helper"));
    assert!(matches!(
        d[7],
        SemanticError::InvalidCondition {
            construct: "if",
            found: Type::Void,
            ..
        }
    ));
    assert!(matches!(
        d[8],
        SemanticError::IncompatibleReturn {
            expected: Type::Int,
            found: Type::Bool,
            ..
        }
    ));

    // First declaration of x survives
    let globals: Vec<_> = analysis.symbols.globals().map(|(name, _)| name).collect();
    assert_eq!(globals, vec!["x"]);
}

#[test]
fn test_driver_reports_demo_failures() {
    let config = DriverConfig {
        color: ColorChoice::Never,
        ..DriverConfig::default()
    };
    let mut driver = Driver::new(config, Vec::new());
    let result = driver.compile_file(Path::new("demos/semantic_errors.mc"));
    assert!(matches!(result, Err(CompileError::Semantic { count: 9 })));

    let output = String::from_utf8(driver.into_inner()).unwrap();
    assert!(output.starts_with("File: demos/semantic_errors.mc"));
    assert!(output.contains("SYMBOL TABLE"));
    assert!(output.contains("9. Semantic error at line 21"));
    assert!(output.contains("Semantic errors: 9"));
}

#[test]
fn test_driver_accepts_valid_demo() {
    let config = DriverConfig {
        verbose: true,
        stage: Stage::Check,
        color: ColorChoice::Never,
        preview: 10,
    };
    let mut driver = Driver::new(config, Vec::new());
    driver
        .compile_file(Path::new("demos/valid.mc"))
        .expect("Valid demo should compile");

    let output = String::from_utf8(driver.into_inner()).unwrap();
    assert!(output.contains("  1. <INT, \"int\">"));
    assert!(output.contains("Program(6 declarations)"));
    assert!(output.contains("No semantic errors found"));
    assert!(output.contains("COMPILATION SUCCEEDED"));
}
