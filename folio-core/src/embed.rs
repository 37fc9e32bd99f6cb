// Embed preparation for third-party dashboard markup.
//
// `embed_code` is untrusted HTML pasted from Tableau, Power BI, Looker Studio
// and similar. It must not be injected into a page verbatim. `sandboxed` wraps
// it in an isolated frame: the markup goes into `srcdoc` (attribute-escaped),
// the frame gets a `sandbox` attribute, and the inner document carries a CSP
// that only allows framing https origins.

use std::sync::LazyLock;

use regex::Regex;

static IFRAME_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<iframe\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("valid iframe regex")
});

static URL_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://([^/?#:]+)").expect("valid host regex"));

/// Sandbox permissions granted to embedded dashboards.
pub const SANDBOX_POLICY: &str = "allow-scripts allow-same-origin allow-popups";

/// Content policy applied inside the sandboxed document.
pub const CONTENT_POLICY: &str = "default-src 'none'; frame-src https:; img-src https: data:; style-src 'unsafe-inline'";

/// What an embed snippet points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedInfo {
    /// `src` of the first iframe, if there is one.
    pub iframe_src: Option<String>,
    /// Host part of `iframe_src` for http(s) URLs.
    pub host: Option<String>,
}

impl EmbedInfo {
    pub fn has_iframe(&self) -> bool {
        self.iframe_src.is_some()
    }
}

pub fn inspect(embed_code: &str) -> EmbedInfo {
    let iframe_src = IFRAME_SRC.captures(embed_code).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
    });
    let host = iframe_src
        .as_deref()
        .and_then(|src| URL_HOST.captures(src))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());
    EmbedInfo { iframe_src, host }
}

/// Wrap untrusted embed markup in a sandboxed frame.
pub fn sandboxed(embed_code: &str, title: &str) -> String {
    let document = format!(
        "<!doctype html><html><head><meta http-equiv=\"Content-Security-Policy\" content=\"{CONTENT_POLICY}\"><style>html,body{{margin:0;height:100%}}iframe{{border:0;width:100%;height:100%}}</style></head><body>{embed_code}</body></html>"
    );
    format!(
        "<iframe title=\"{}\" sandbox=\"{SANDBOX_POLICY}\" referrerpolicy=\"no-referrer\" loading=\"lazy\" width=\"100%\" height=\"500\" srcdoc=\"{}\"></iframe>",
        escape_attr(title),
        escape_attr(&document)
    )
}

/// Escape a string for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_projects;

    #[test]
    fn inspects_seed_embeds() {
        let seeds = seed_projects();
        let hosts: Vec<Option<String>> = seeds
            .iter()
            .map(|p| inspect(&p.embed_code).host)
            .collect();
        assert_eq!(
            hosts,
            vec![
                Some("public.tableau.com".to_string()),
                Some("app.powerbi.com".to_string()),
                Some("lookerstudio.google.com".to_string()),
            ]
        );
    }

    #[test]
    fn src_after_other_attributes_and_single_quotes() {
        let info = inspect("<IFRAME width='100%' SRC='https://viz.example.org/a?b=1'></IFRAME>");
        assert_eq!(info.iframe_src.as_deref(), Some("https://viz.example.org/a?b=1"));
        assert_eq!(info.host.as_deref(), Some("viz.example.org"));
    }

    #[test]
    fn markup_without_iframe() {
        let info = inspect("<div class=\"tableauPlaceholder\"></div><script src=\"x.js\"></script>");
        assert!(!info.has_iframe());
        assert_eq!(info.host, None);
    }

    #[test]
    fn sandboxed_escapes_everything_into_srcdoc() {
        let out = sandboxed("<script>alert(\"x\")</script>", "Q3 \"Sales\"");
        assert!(out.starts_with("<iframe title=\"Q3 &quot;Sales&quot;\""));
        assert!(out.contains(&format!("sandbox=\"{SANDBOX_POLICY}\"")));
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert_eq!(out.matches("<iframe").count(), 1);
    }

    #[test]
    fn escape_attr_handles_ampersand_first() {
        assert_eq!(escape_attr("a&lt;b"), "a&amp;lt;b");
    }
}
