//! Prompt templates for the matching pipeline

use std::collections::HashMap;

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template with variables in a single left-to-right pass.
    ///
    /// Inserted values are never rescanned, so a value containing `{{name}}` is kept
    /// verbatim. Placeholders without a value are left as they are.
    #[must_use]
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                rest = &rest[start..];
                break;
            };

            let placeholder = &rest[start..start + 2 + end + 2];
            match values.get(&after_open[..end]) {
                Some(value) => result.push_str(value),
                None => result.push_str(placeholder),
            }
            rest = &after_open[end + 2..];
        }

        result.push_str(rest);
        result
    }

    /// Render from borrowed `(name, value)` pairs
    #[must_use]
    pub fn render_with(&self, pairs: &[(&str, &str)]) -> String {
        let values = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.render(&values)
    }

    /// Get required variables
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // skip second '{'
            let mut var_name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    chars.next();
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        break;
                    }
                } else {
                    var_name.push(ch);
                    chars.next();
                }
            }
            if !var_name.is_empty() && !variables.contains(&var_name) {
                variables.push(var_name);
            }
        }
    }

    variables
}

/// Prompts used by the transformer and scorer
pub struct MatchPrompts;

impl MatchPrompts {
    /// Split a user request into a semantic query and hard filters
    #[must_use]
    pub fn query_transform() -> PromptTemplate {
        PromptTemplate::new(
            r#"You turn housing requests into hybrid search parameters.

User request: "{{user_input}}"

Respond with a single JSON object with exactly these keys:
- "semantic_query": a short phrase for vector similarity search. Keep the style, location and amenities; drop budget and room counts.
- "filters": an object with integer fields "max_price" (whole currency units, so "$500k" is 500000) and "min_bedrooms". Use 0 for anything the user did not state.

Example: {"semantic_query": "quiet family home with a garden", "filters": {"max_price": 750000, "min_bedrooms": 3}}

Output JSON only."#,
        )
    }

    /// Rate one property against the user's needs
    #[must_use]
    pub fn match_score() -> PromptTemplate {
        PromptTemplate::new(
            r#"Rate how well the property fits the user's needs.

User needs: {{user_input}}
Property: {{property}}
Price: ${{price}}

Respond with a single JSON object: {"score": <integer 0-100>, "reason": "<one short sentence>"}
Output JSON only."#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_variables() {
        let template = PromptTemplate::new("Hello {{name}}, you are {{age}} years old.");
        assert_eq!(template.variables(), &["name", "age"]);
    }

    #[test]
    fn test_template_render() {
        let template = PromptTemplate::new("Hello {{name}}!");
        let mut values = HashMap::new();
        values.insert("name".to_string(), "Alice".to_string());
        assert_eq!(template.render(&values), "Hello Alice!");
    }

    #[test]
    fn test_single_braces_are_not_variables() {
        let template = MatchPrompts::match_score();
        assert_eq!(template.variables(), &["user_input", "property", "price"]);

        let prompt = template.render_with(&[
            ("user_input", "2 bed near a park"),
            ("property", "Loft downtown"),
            ("price", "420000"),
        ]);
        assert!(prompt.contains("Price: $420000"));
        assert!(prompt.contains(r#"{"score": <integer 0-100>"#));
    }

    #[test]
    fn test_values_are_not_substituted_again() {
        let prompt = MatchPrompts::match_score().render_with(&[
            ("user_input", "near a park, price {{price}} tops"),
            ("property", "Loft {{user_input}} downtown"),
            ("price", "420000"),
        ]);
        assert!(prompt.contains("User needs: near a park, price {{price}} tops\n"));
        assert!(prompt.contains("Property: Loft {{user_input}} downtown\n"));
        assert!(prompt.contains("Price: $420000"));
    }

    #[test]
    fn test_missing_and_unclosed_placeholders_are_kept() {
        let template = PromptTemplate::new("{{a}} and {{b}} then {{open");
        let prompt = template.render_with(&[("a", "x")]);
        assert_eq!(prompt, "x and {{b}} then {{open");
    }

    #[test]
    fn test_transform_prompt_embeds_input() {
        let prompt = MatchPrompts::query_transform()
            .render_with(&[("user_input", "cheap studio, max $900")]);
        assert!(prompt.contains("User request: \"cheap studio, max $900\""));
        assert!(!prompt.contains("{{"));
    }
}
