//! JSGF command grammar.
//!
//! ```text
//! #JSGF V1.0;
//! grammar custom;
//! public <cmd1>="yes";
//! public <cmd2>="no";
//! ```
//!
//! Productions are numbered from 1 in input order. An empty rule list still
//! produces the two header lines.
//!
//! In [`RuleQuoting::Quoted`] mode the rule text is escaped before it is
//! placed between the quotes: `\` becomes `\\` and `"` becomes `\"`, so a
//! word such as `say "hi"` stays a single quoted token. Bare rules are
//! written untouched.

use serde::{Deserialize, Serialize};

pub const JSGF_HEADER: &str = "#JSGF V1.0;";

/// How each rule's text is placed on the right-hand side of its production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleQuoting {
    /// `public <cmdN>="<rule>";`: the rule is one literal token sequence.
    Quoted,
    /// `public <cmdN>=<rule>;`: the rule is raw JSGF, e.g. `(yes | no)`.
    Bare,
}

pub fn render_grammar(name: &str, rules: &[String], quoting: RuleQuoting) -> String {
    let mut out = format!("{JSGF_HEADER}\ngrammar {name};\n");
    for (i, rule) in rules.iter().enumerate() {
        let n = i + 1;
        match quoting {
            RuleQuoting::Quoted => {
                out.push_str(&format!("public <cmd{n}>=\"{}\";\n", escape_quoted(rule)))
            }
            RuleQuoting::Bare => out.push_str(&format!("public <cmd{n}>={rule};\n")),
        }
    }
    out
}

fn escape_quoted(rule: &str) -> String {
    let mut escaped = String::with_capacity(rule.len());
    for c in rule.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quoted_productions_are_numbered_in_order() {
        let text = render_grammar("custom", &rules(&["yes", "no", "yes no"]), RuleQuoting::Quoted);
        assert_eq!(
            text,
            "#JSGF V1.0;\ngrammar custom;\n\
             public <cmd1>=\"yes\";\n\
             public <cmd2>=\"no\";\n\
             public <cmd3>=\"yes no\";\n"
        );
    }

    #[test]
    fn bare_productions_keep_rule_syntax() {
        let text = render_grammar("robot", &rules(&["(go | stop)"]), RuleQuoting::Bare);
        assert_eq!(text, "#JSGF V1.0;\ngrammar robot;\npublic <cmd1>=(go | stop);\n");
    }

    #[test]
    fn quoted_rules_escape_quotes_and_backslashes() {
        let text = render_grammar("custom", &rules(&["say \"hi\"", "a\\b"]), RuleQuoting::Quoted);
        assert_eq!(
            text,
            "#JSGF V1.0;\ngrammar custom;\n\
             public <cmd1>=\"say \\\"hi\\\"\";\n\
             public <cmd2>=\"a\\\\b\";\n"
        );
    }

    #[test]
    fn bare_rules_are_not_escaped() {
        let text = render_grammar("custom", &rules(&["\"yes\" | no"]), RuleQuoting::Bare);
        assert!(text.ends_with("public <cmd1>=\"yes\" | no;\n"));
    }

    #[test]
    fn empty_rules_emit_header_only() {
        let text = render_grammar("custom", &[], RuleQuoting::Quoted);
        assert_eq!(text, "#JSGF V1.0;\ngrammar custom;\n");
        assert_eq!(text.matches("public <cmd").count(), 0);
    }

    #[test]
    fn numbering_has_no_gaps() {
        let many: Vec<String> = (0..12).map(|i| format!("w{i}")).collect();
        let text = render_grammar("custom", &many, RuleQuoting::Quoted);
        for n in 1..=12 {
            assert!(text.contains(&format!("<cmd{n}>=\"w{}\"", n - 1)), "cmd{n} missing");
        }
        assert!(!text.contains("<cmd13>"));
        assert!(!text.contains("<cmd0>"));
    }
}
