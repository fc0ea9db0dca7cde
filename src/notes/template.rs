//! Template placeholder substitution and the built-in default template.

use super::types::{Stamp, Topic};

pub const DATE_TOKEN: &str = "{{DATE}}";
pub const TIME_TOKEN: &str = "{{TIME}}";
pub const TIMESTAMP_TOKEN: &str = "{{TIMESTAMP}}";
/// Bracket-style placeholder used by older templates.
pub const MINUTE_TOKEN: &str = "<YYYY-MM-DD HH:MM>";

/// Replace every recognized placeholder with its stamp value.
///
/// Substitution is literal; anything that is not an exact token match is left as-is.
pub fn render(template: &str, stamp: &Stamp) -> String {
    template
        .replace(DATE_TOKEN, &stamp.date)
        .replace(TIME_TOKEN, &stamp.time)
        .replace(TIMESTAMP_TOKEN, &stamp.timestamp)
        .replace(MINUTE_TOKEN, &stamp.minute)
}

/// Skeleton written to `TEMPLATE.md` when a topic has none and the
/// default-template policy is enabled.
pub fn default_template(topic: Topic) -> String {
    format!(
        r#"# Research: {title} - {DATE_TOKEN}

**Time:** {TIME_TOKEN} UTC
**Topic:** {topic}

---

## Accurate Takeaways

*Plain statements validated from sources. No marketing language.*

1. **Finding 1**: [Statement with citation]
2. **Finding 2**: [Statement with citation]
3. **Finding 3**: [Statement with citation]

## Objects & Data Sources

| Object/View | Type | Source | Notes |
|-------------|------|--------|-------|
| | | | |

## MVP Features Unlocked

*PR-sized ideas that can be shipped based on these findings.*

1. **Feature 1**: [Brief description]
2. **Feature 2**: [Brief description]
3. **Feature 3**: [Brief description]

## Concrete Artifacts

*SQL drafts, ADRs, schemas, pseudocode, etc.*

### [Artifact Name]

```sql
-- draft
```

## Risks / Assumptions

| Risk/Assumption | Impact | Validation |
|-----------------|--------|------------|
| | | |

## Links & Citations

1. [Title](URL) - *Brief description of relevance*
2. [Title](URL) - *Brief description of relevance*

## Next Steps / Follow-ups

- [ ] Action item 1
- [ ] Action item 2
"#,
        title = topic.title(),
        topic = topic.as_str(),
    )
}
