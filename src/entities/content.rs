use crate::api::resources::Resource;
use crate::list::entity::{FilterDef, ListEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListEntity for BlogPost {
    const RESOURCE: Resource = Resource::Blogs;
    const FILTERS: &'static [FilterDef] =
        &[FilterDef::server("status", &["all", "published", "draft"])];
    const COLUMNS: &'static [&'static str] = &["Title", "Slug", "Author", "State"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.slug.clone(),
            self.author.clone(),
            if self.published { "published" } else { "draft" }.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub quote: String,
    #[serde(default)]
    pub rating: u8,
}

impl ListEntity for Testimonial {
    const RESOURCE: Resource = Resource::Testimonials;
    const COLUMNS: &'static [&'static str] = &["Name", "Rating", "Quote"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format!("{}/5", self.rating),
            truncate(&self.quote, 48),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(alias = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl ListEntity for Faq {
    const RESOURCE: Resource = Resource::Faqs;
    const COLUMNS: &'static [&'static str] = &["Question", "Answer"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.question
    }

    fn cells(&self) -> Vec<String> {
        vec![self.question.clone(), truncate(&self.answer, 60)]
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Pflegekräfte", 6), "Pfleg…");
        assert_eq!(truncate("Pflegekräfte", 6).chars().count(), 6);
    }
}
