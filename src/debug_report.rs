mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// One rule's contribution to a verbose CLI run.
pub struct RuleStep {
    pub rule: &'static str,
    pub before: String,
    pub after: String,
}

pub fn print_run(input: &str, steps: &[RuleStep], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Sanitizing: \"{input}\""), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if steps.is_empty() {
        println!("{}", palette.dim("  No recognized rules"));
    } else {
        print_steps(steps, &palette);
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    let result = steps.last().map(|step| step.after.as_str()).unwrap_or(input);
    println!("  {}", palette.bold(palette.paint(result, ansi::GREEN)));
    println!();
}

fn print_steps(steps: &[RuleStep], palette: &ansi::Palette) {
    for step in steps {
        let changed = step.after != step.before;

        println!(
            "  {} {}",
            palette.paint(format!("{}:", step.rule), ansi::BLUE),
            if changed {
                palette.paint("✓ changed", ansi::GREEN)
            } else {
                palette.dim("✗ unchanged")
            }
        );

        if changed {
            println!("    {} {}", palette.dim("before:"), palette.paint(preview(&step.before), ansi::YELLOW));
            println!("    {} {}", palette.dim("after: "), palette.paint(preview(&step.after), ansi::CYAN));
        }
    }
}

fn preview(s: &str) -> String {
    let truncated: String = s.chars().take(80).collect();
    if truncated.len() < s.len() { format!("{truncated}…") } else { truncated }
}
