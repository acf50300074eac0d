//! Pipeline orchestration: sources, node programs and diagnostics

use log::debug;

use crate::common::{CompileResult, DiagnosticReporter};
use crate::frontend::ast::Program;
use crate::frontend::lexer::Token;
use crate::frontend::{CompileContext, FrontendConfig, ToyFrontend};

/// Owns the diagnostic reporter and runs the frontend over inputs
pub struct Pipeline {
    frontend: ToyFrontend,
    reporter: DiagnosticReporter,
    config: FrontendConfig,
}

impl Pipeline {
    pub fn new(config: FrontendConfig) -> Self {
        Self {
            frontend: ToyFrontend::new(),
            reporter: DiagnosticReporter::new(),
            config,
        }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn reporter(&self) -> &DiagnosticReporter {
        &self.reporter
    }

    /// Scan source text that is already in memory
    pub fn scan_source(&mut self, filename: &str, source: &str) -> CompileResult<Vec<Token>> {
        let file_id = self.reporter.add_file(filename, source);
        let ctx = CompileContext::new(filename, Some(file_id), &self.reporter);
        self.frontend.scan(source, &ctx, &self.config)
    }

    /// Load and check a JSON node program
    ///
    /// `source` is the `(name, text)` of the program's original source; when
    /// given, semantic errors are labelled on the offending line.
    pub fn check_json(&mut self, filename: &str, json: &str, source: Option<(&str, &str)>) -> CompileResult<()> {
        let file_id = source.map(|(name, text)| self.reporter.add_file(name, text));
        let ctx = CompileContext::new(filename, file_id, &self.reporter);

        let program = match Program::from_json(json) {
            Ok(program) => program,
            Err(e) => {
                self.reporter.report_error(None, &e);
                return Err(e);
            }
        };
        debug!("loaded {} item(s) from {}", program.items.len(), filename);

        self.frontend.check(&program, &ctx, &self.config)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(FrontendConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CompileError;

    #[test]
    fn test_malformed_json_is_a_program_error() {
        let mut pipeline = Pipeline::default();
        let err = pipeline.check_json("broken.json", "[{\"kind\":", None).unwrap_err();
        assert!(matches!(err, CompileError::Program(_)));
    }

    #[test]
    fn test_semantic_error_rendered_against_source() {
        let source = "int x;\nx = true;\n";
        let json = r#"[{"kind":"vardecl","name":"x","type":"int","line":1},
                       {"kind":"assign","name":"x","expr":{"kind":"lit","type":"boolean","value":true},"line":2}]"#;

        let mut pipeline = Pipeline::default();
        let err = pipeline.check_json("prog.json", json, Some(("prog.tl", source))).unwrap_err();
        let rendered = pipeline.reporter().render(Some(0), &err);

        assert!(rendered.contains("TypeMismatch"));
        assert!(rendered.contains("prog.tl:2:1"));
    }
}
