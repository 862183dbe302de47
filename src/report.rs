//! Check accounting and colored console reporting
//!
//! Every check prints a labeled status line; the counters decide the
//! process exit status. Counters only ever grow.

use colored::Colorize;

/// Outcome label for a single status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Warn,
    Info,
}

/// Print a colored status line
pub fn print_status(message: &str, status: Status) {
    let label = match status {
        Status::Pass => "[PASS]".green(),
        Status::Fail => "[FAIL]".red(),
        Status::Warn => "[WARN]".yellow(),
        Status::Info => "[INFO]".blue(),
    };
    println!("{} {}", label, message);
}

/// Print a bold section banner
pub fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(60).bold());
    println!("{}", title.bold());
    println!("{}\n", "=".repeat(60).bold());
}

/// Aggregated results of one harness run
#[derive(Debug, Default, Clone)]
pub struct TestResults {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a numbered check
    pub fn start_check(&mut self) {
        self.total += 1;
    }

    /// Record a passed check and print its line
    pub fn pass(&mut self, message: &str) {
        self.passed += 1;
        print_status(message, Status::Pass);
    }

    /// Record a failed check and print its line
    pub fn fail(&mut self, message: &str) {
        self.failed += 1;
        print_status(message, Status::Fail);
    }

    /// Record a warning and print its line. Warnings never fail the run.
    pub fn warn(&mut self, message: &str) {
        self.warnings += 1;
        print_status(message, Status::Warn);
    }

    /// Print the summary block
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60).bold());
        println!("{}", "Test Results Summary".bold());
        println!("{}", "=".repeat(60));
        println!("Total:    {}", self.total);
        println!("{}", format!("Passed:   {}", self.passed).green());
        println!("{}", format!("Failed:   {}", self.failed).red());
        println!("{}", format!("Warnings: {}", self.warnings).yellow());
        println!("{}\n", "=".repeat(60));
    }

    /// 0 iff no check failed; warnings do not affect the exit status
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_affect_exit_code() {
        let mut results = TestResults::new();
        results.start_check();
        results.pass("ok");
        results.warn("slow");
        results.warn("slower");
        assert_eq!(results.exit_code(), 0);
    }

    #[test]
    fn any_failure_is_nonzero() {
        let mut results = TestResults::new();
        results.start_check();
        results.pass("ok");
        results.start_check();
        results.fail("broken");
        assert_eq!(results.exit_code(), 1);
        assert_eq!(results.total, 2);
    }
}
