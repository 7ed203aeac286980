use crate::colors::Colors;
use crate::format::{FormatConfig, FormatResult, ProblemKind};
use similar::{ChangeTag, TextDiff};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

pub struct Config {
    pub check_only: bool,
    pub output_mode: OutputMode,
    /// Rewrite files even when comments or fields would be lost
    pub allow_drop: bool,
    pub format: FormatConfig,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files_formatted: usize,
    pub files_with_problems: usize,
    pub warnings: usize,
}

impl RunResult {
    pub fn has_problems(&self) -> bool {
        self.files_with_problems > 0
    }
}

fn describe(kind: &ProblemKind) -> &'static str {
    match kind {
        ProblemKind::CommentDropped => "comment will be removed",
        ProblemKind::LineDropped => "line is not part of any section and will be removed",
    }
}

pub fn print_check_result(path: &Path, result: &FormatResult, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(&path.display().to_string(), &result.original, &result.content),
        OutputMode::Normal => {
            println!(
                "{} {}",
                ctx.colors.paint(ctx.colors.error, "Would reformat:"),
                path.display()
            );
            for problem in &result.problems {
                println!("  - line {}: {}", problem.line, describe(&problem.kind));
            }
        }
    }
}

pub fn print_fix_result(path: &Path, result: &FormatResult, ctx: &OutputContext) {
    match ctx.mode {
        OutputMode::Quiet => println!("{}", path.display()),
        OutputMode::Diff => print_diff(&path.display().to_string(), &result.original, &result.content),
        OutputMode::Normal => {
            for problem in &result.problems {
                println!(
                    "{} {}:{} {}",
                    ctx.colors.paint(ctx.colors.warning, "Warning:"),
                    path.display(),
                    problem.line,
                    describe(&problem.kind)
                );
            }
            println!(
                "{} {}",
                ctx.colors.paint(ctx.colors.success, "Formatted:"),
                path.display()
            );
        }
    }
}

/// File left untouched because formatting would lose content.
pub fn print_refused(path: &Path, result: &FormatResult, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }
    println!(
        "{} {} (use --allow-drop to rewrite anyway)",
        ctx.colors.paint(ctx.colors.error, "Not formatted:"),
        path.display()
    );
    for problem in &result.problems {
        println!("  - line {}: {}", problem.line, describe(&problem.kind));
    }
}

pub fn print_checked(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!("{} {}", ctx.colors.paint(ctx.colors.info, "Unchanged:"), path.display());
}

pub fn print_skipped(path: &Path, reason: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{} {}",
        ctx.colors.paint(ctx.colors.info, &format!("Skipping {reason}:")),
        path.display()
    );
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    let diff = TextDiff::from_lines(original, content);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
                if change.missing_newline() {
                    println!();
                }
            }
        }
    }
}

pub fn print_summary(result: &RunResult, config: &Config, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }

    if config.check_only {
        if result.has_problems() {
            println!();
            println!(
                "{}",
                ctx.colors.paint(
                    ctx.colors.error,
                    &format!("{} files would be reformatted", result.files_with_problems)
                )
            );
        }
        return;
    }

    let mut parts = vec![];
    if result.has_problems() {
        parts.push(ctx.colors.paint(
            ctx.colors.error,
            &format!("{} files not formatted", result.files_with_problems),
        ));
    }
    if result.files_formatted > 0 {
        parts.push(ctx.colors.paint(
            ctx.colors.success,
            &format!("{} files formatted", result.files_formatted),
        ));
    }
    if result.warnings > 0 {
        parts.push(
            ctx.colors
                .paint(ctx.colors.warning, &format!("{} warnings", result.warnings)),
        );
    }
    if !parts.is_empty() {
        println!();
        println!("{}", parts.join(", "));
    }
}
