//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Separator between classpath entries on this platform.
#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: &str = ";";

/// Separator between classpath entries on this platform.
#[cfg(not(windows))]
pub const CLASSPATH_SEPARATOR: &str = ":";

/// Flag the Clojure CLI takes the classpath through.
pub const CLASSPATH_FLAG: &str = "-Scp";

/// A goal process exited unsuccessfully or could not be started.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("`{executable}` {}", describe_failure(.exit_code, .cause))]
#[diagnostic(code(cljgoal::process::failed))]
pub struct SubprocessFailure {
    pub executable: String,
    /// Exit code, when the process ran and reported one
    pub exit_code: Option<i32>,
    /// Launch or wait error
    #[source]
    pub cause: Option<std::io::Error>,
}

fn describe_failure(exit_code: &Option<i32>, cause: &Option<std::io::Error>) -> String {
    match (exit_code, cause) {
        (Some(code), _) => format!("failed with exit code {}", code),
        (None, Some(_)) => "could not be executed".to_string(),
        (None, None) => "was terminated by a signal".to_string(),
    }
}

impl SubprocessFailure {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        if let Some(ref cause) = self.cause {
            diag = diag.with_context(cause.to_string());
            if cause.kind() == std::io::ErrorKind::NotFound {
                diag = diag.with_suggestion(format!(
                    "Install `{}` or set `executable` in the goal configuration",
                    self.executable
                ));
            }
        }
        diag.with_suggestion(suggestions::RERUN_VERBOSE)
    }
}

/// Builder for subprocess execution.
///
/// The child inherits this process's environment and standard streams.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute and return status only.
    pub fn status(&self) -> std::io::Result<ExitStatus> {
        self.build_command().status()
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Everything needed to run one goal process.
#[derive(Debug, Clone)]
pub struct GoalInvocation<'a> {
    pub executable: &'a str,
    pub arguments: Option<&'a str>,
    pub classpath: &'a [String],
    pub working_dir: &'a Path,
}

impl GoalInvocation<'_> {
    /// Build the process: `<executable> -Scp <classpath> <arguments...>`.
    pub fn to_process(&self) -> ProcessBuilder {
        let program = find_executable(self.executable)
            .unwrap_or_else(|| PathBuf::from(self.executable));

        ProcessBuilder::new(program)
            .arg(CLASSPATH_FLAG)
            .arg(self.classpath.join(CLASSPATH_SEPARATOR))
            .args(self.arguments.map(split_args).unwrap_or_default())
            .cwd(self.working_dir)
    }
}

/// Run a goal process, translating anything but a zero exit into a failure.
pub fn run_with_classpath(invocation: &GoalInvocation<'_>) -> Result<(), SubprocessFailure> {
    let process = invocation.to_process();
    tracing::debug!("Command line: {}", process.display_command());

    match process.status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(SubprocessFailure {
            executable: invocation.executable.to_string(),
            exit_code: status.code(),
            cause: None,
        }),
        Err(e) => Err(SubprocessFailure {
            executable: invocation.executable.to_string(),
            exit_code: None,
            cause: Some(e),
        }),
    }
}

/// Split an argument string into words.
///
/// Whitespace separates words; single quotes take everything literally,
/// double quotes allow backslash escapes, and a backslash outside quotes
/// escapes the next character.
pub fn split_args(input: &str) -> Vec<String> {
    #[derive(PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_word = true;
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("clojure").args(["-Scp", "src:target/classes", "-m", "app"]);

        assert_eq!(pb.display_command(), "clojure -Scp src:target/classes -m app");
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args("-m hello.core"), ["-m", "hello.core"]);
        assert_eq!(split_args("  -e   '(println 1)' "), ["-e", "(println 1)"]);
        assert_eq!(split_args(r#"-e "(str \"a b\")""#), ["-e", r#"(str "a b")"#]);
        assert_eq!(split_args(r"a\ b c"), ["a b", "c"]);
        assert_eq!(split_args("''"), [""]);
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn test_invocation_shape() {
        let classpath = vec!["src/main/clojure".to_string(), "target/classes".to_string()];
        let invocation = GoalInvocation {
            executable: "definitely-not-on-path-cljgoal",
            arguments: Some("-m app.core"),
            classpath: &classpath,
            working_dir: Path::new("/work/app"),
        };
        let process = invocation.to_process();

        assert_eq!(process.get_program(), Path::new("definitely-not-on-path-cljgoal"));
        assert_eq!(
            process.get_args(),
            [
                CLASSPATH_FLAG.to_string(),
                format!("src/main/clojure{}target/classes", CLASSPATH_SEPARATOR),
                "-m".to_string(),
                "app.core".to_string(),
            ]
        );
    }

    #[test]
    fn test_launch_failure_is_subprocess_failure() {
        let invocation = GoalInvocation {
            executable: "definitely-not-on-path-cljgoal",
            arguments: None,
            classpath: &[],
            working_dir: Path::new("."),
        };
        let err = run_with_classpath(&invocation).unwrap_err();

        assert_eq!(err.exit_code, None);
        assert!(err.cause.is_some());
        assert!(err.to_string().contains("could not be executed"));
    }

    #[test]
    fn test_exit_code_is_reported() {
        let err = SubprocessFailure {
            executable: "clojure".into(),
            exit_code: Some(3),
            cause: None,
        };
        assert_eq!(err.to_string(), "`clojure` failed with exit code 3");
        assert!(err.to_diagnostic().format(false).contains("--verbose"));
    }
}
