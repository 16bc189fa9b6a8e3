// Stylesheet model for encapsulated widget styles


use std::fmt;

/// CSS property
#[derive(Debug, Clone, PartialEq)]
pub struct CssProperty {
    /// Name of the property
    pub name: String,
    /// Value of the property
    pub value: String,
}

impl CssProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// CSS selector
#[derive(Debug, Clone, PartialEq)]
pub struct CssSelector {
    /// Selector text
    pub selector: String,
    /// Properties for this selector
    pub properties: Vec<CssProperty>,
}

/// CSS rule with selector, properties, and metadata
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The CSS selector(s) for this rule
    pub selectors: Vec<CssSelector>,
    /// Source order for breaking ties
    pub source_order: usize,
}

impl StyleRule {
    /// Create a new StyleRule
    pub fn new(selectors: Vec<CssSelector>, source_order: usize) -> Self {
        Self {
            selectors,
            source_order,
        }
    }

    /// Whether any selector of this rule targets `.class` (pseudo-classes allowed)
    pub fn targets_class(&self, class: &str) -> bool {
        let needle = format!(".{class}");
        self.selectors.iter().any(|selector| {
            selector.selector.match_indices(&needle).any(|(index, _)| {
                let rest = &selector.selector[index + needle.len()..];
                !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
        })
    }
}

/// A `@keyframes` block
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    /// Animation name
    pub name: String,
    /// Frames keyed by offset selector (`from`, `to`, `50%`)
    pub frames: Vec<CssSelector>,
}

/// CSS stylesheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Rules in this stylesheet
    pub rules: Vec<StyleRule>,
    /// Keyframe animations declared in this stylesheet
    pub keyframes: Vec<Keyframes>,
}

impl Stylesheet {
    /// Create a new empty stylesheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the stylesheet
    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Insert a rule ahead of every other rule
    pub fn prepend_rule(&mut self, selector: &str, properties: Vec<CssProperty>) {
        for rule in &mut self.rules {
            rule.source_order += 1;
        }
        self.rules.insert(
            0,
            StyleRule::new(
                vec![CssSelector {
                    selector: selector.to_string(),
                    properties,
                }],
                0,
            ),
        );
    }

    /// Whether some rule styles `.class`
    pub fn has_class_rule(&self, class: &str) -> bool {
        self.rules.iter().any(|rule| rule.targets_class(class))
    }

    pub fn keyframes(&self, name: &str) -> Option<&Keyframes> {
        self.keyframes.iter().find(|keyframes| keyframes.name == name)
    }

    /// Parse CSS text into a stylesheet
    ///
    /// Supports plain rules with comma-separated selectors, `/* */` comments
    /// and `@keyframes` blocks. Other at-rules are rejected.
    pub fn parse(css: &str) -> Result<Self, StyleError> {
        let css = strip_comments(css)?;
        let mut stylesheet = Self::new();
        let mut rest = css.as_str();
        let mut source_order = 0;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let open = rest
                .find('{')
                .ok_or_else(|| StyleError::ParseError(format!("expected '{{' after '{}'", rest.trim())))?;
            let prelude = rest[..open].trim();
            let (body, after) = split_block(&rest[open..])?;

            if let Some(name) = prelude.strip_prefix("@keyframes") {
                let name = name.trim();
                if name.is_empty() {
                    return Err(StyleError::ParseError("@keyframes without a name".to_string()));
                }
                stylesheet.keyframes.push(Keyframes {
                    name: name.to_string(),
                    frames: parse_frames(body)?,
                });
            } else if prelude.starts_with('@') {
                return Err(StyleError::ParseError(format!("unsupported at-rule '{prelude}'")));
            } else {
                if body.contains('{') {
                    return Err(StyleError::ParseError(format!(
                        "nested block inside '{prelude}'"
                    )));
                }
                let properties = parse_declarations(body)?;
                let selectors = parse_selectors(prelude, &properties)?;
                stylesheet.add_rule(StyleRule::new(selectors, source_order));
                source_order += 1;
            }

            rest = after;
        }

        Ok(stylesheet)
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            let selectors: Vec<&str> = rule
                .selectors
                .iter()
                .map(|selector| selector.selector.as_str())
                .collect();
            writeln!(f, "{} {{", selectors.join(", "))?;
            if let Some(first) = rule.selectors.first() {
                for property in &first.properties {
                    writeln!(f, "  {}: {};", property.name, property.value)?;
                }
            }
            writeln!(f, "}}")?;
        }

        for keyframes in &self.keyframes {
            writeln!(f, "@keyframes {} {{", keyframes.name)?;
            for frame in &keyframes.frames {
                writeln!(f, "  {} {{", frame.selector)?;
                for property in &frame.properties {
                    writeln!(f, "    {}: {};", property.name, property.value)?;
                }
                writeln!(f, "  }}")?;
            }
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

fn strip_comments(css: &str) -> Result<String, StyleError> {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let end = rest[start + 2..]
            .find("*/")
            .ok_or_else(|| StyleError::ParseError("unterminated comment".to_string()))?;
        rest = &rest[start + 2 + end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Split `{ ... } rest` into the block's inner text and whatever follows it
fn split_block(input: &str) -> Result<(&str, &str), StyleError> {
    let mut depth = 0usize;
    for (index, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| StyleError::ParseError("unexpected '}'".to_string()))?;
                if depth == 0 {
                    return Ok((&input[1..index], &input[index + 1..]));
                }
            }
            _ => {}
        }
    }
    Err(StyleError::ParseError("unterminated block".to_string()))
}

fn parse_selectors(
    prelude: &str,
    properties: &[CssProperty],
) -> Result<Vec<CssSelector>, StyleError> {
    let selectors: Vec<CssSelector> = prelude
        .split(',')
        .map(str::trim)
        .filter(|selector| !selector.is_empty())
        .map(|selector| CssSelector {
            selector: selector.to_string(),
            properties: properties.to_vec(),
        })
        .collect();

    if selectors.is_empty() {
        return Err(StyleError::ParseError("rule without a selector".to_string()));
    }
    Ok(selectors)
}

fn parse_declarations(body: &str) -> Result<Vec<CssProperty>, StyleError> {
    body.split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .map(|declaration| {
            let (name, value) = declaration.split_once(':').ok_or_else(|| {
                StyleError::ParseError(format!("invalid declaration '{declaration}'"))
            })?;
            Ok(CssProperty::new(name.trim(), value.trim()))
        })
        .collect()
}

fn parse_frames(body: &str) -> Result<Vec<CssSelector>, StyleError> {
    let mut frames = Vec::new();
    let mut rest = body;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(frames);
        }
        let open = rest
            .find('{')
            .ok_or_else(|| StyleError::ParseError("expected keyframe block".to_string()))?;
        let selector = rest[..open].trim().to_string();
        let (inner, after) = split_block(&rest[open..])?;
        frames.push(CssSelector {
            selector,
            properties: parse_declarations(inner)?,
        });
        rest = after;
    }
}

/// Errors that can occur when handling styles
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Error parsing CSS: {0}")]
    ParseError(String),
}
