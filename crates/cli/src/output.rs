use plusopt_metadata::{OptionValue, ParseReport, ProgramInfo};
use serde::Serialize;

/// Everything `plusopt-check` prints for one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CheckOutput<'a> {
    pub program: &'a ProgramInfo,
    #[serde(flatten)]
    pub report: ParseReport,
    pub stdin_reads: u32,
}

impl CheckOutput<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Aligned, human-readable rendering.
    pub fn to_text(&self) -> String {
        let rows: Vec<(String, String)> = self
            .report
            .options
            .iter()
            .map(|o| {
                let left = match o.short {
                    Some(c) => format!("-{c}/--{} ({})", o.long, o.kind.as_str()),
                    None => format!("--{} ({})", o.long, o.kind.as_str()),
                };
                (left, format_value(&o.value))
            })
            .collect();
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

        let mut out = String::new();
        if !rows.is_empty() {
            out.push_str("Options:\n");
            for (left, value) in rows {
                out.push_str(&format!("  {:width$}  {}\n", left, value, width = width));
            }
        }
        out.push_str(&format!("Rest: {:?}\n", self.report.rest));
        if self.stdin_reads > 0 {
            out.push_str(&format!("Stdin reads: {}\n", self.stdin_reads));
        }
        out
    }
}

fn format_value(value: &OptionValue) -> String {
    match value {
        OptionValue::Passed(b) => b.to_string(),
        OptionValue::Value(s) => format!("{s:?}"),
        OptionValue::Values(v) => format!("{v:?}"),
        OptionValue::Count(n) => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plusopt_metadata::{OptionKind, OptionReport};

    fn sample(program: &ProgramInfo) -> CheckOutput<'_> {
        CheckOutput {
            program,
            report: ParseReport {
                options: vec![
                    OptionReport {
                        kind: OptionKind::Counter,
                        short: Some('v'),
                        long: "verbose".to_string(),
                        value: OptionValue::Count(2),
                    },
                    OptionReport {
                        kind: OptionKind::SingleArg,
                        short: None,
                        long: "output".to_string(),
                        value: OptionValue::Value("out.txt".to_string()),
                    },
                ],
                rest: vec!["in.txt".to_string()],
            },
            stdin_reads: 1,
        }
    }

    #[test]
    fn text_is_aligned() {
        let program = ProgramInfo::new("tool", "1.0");
        let text = sample(&program).to_text();
        assert!(text.contains("  -v/--verbose (counter)  2\n"), "{text}");
        assert!(text.contains("  --output (single-arg)   \"out.txt\"\n"), "{text}");
        assert!(text.contains("Rest: [\"in.txt\"]\n"));
        assert!(text.contains("Stdin reads: 1\n"));
    }

    #[test]
    fn json_flattens_report() {
        let program = ProgramInfo::new("tool", "1.0");
        let json: serde_json::Value =
            serde_json::from_str(&sample(&program).to_json().unwrap()).unwrap();
        assert_eq!(json["program"]["name"], "tool");
        assert_eq!(json["options"][0]["value"]["count"], 2);
        assert_eq!(json["rest"][0], "in.txt");
        assert_eq!(json["stdin-reads"], 1);
    }
}
