//! Form field scraping for the "clone bug" (enter_bug.cgi) page.

use super::selector;
use crate::error::CloneError;
use scraper::Html;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Container of the new-bug form on enter_bug.cgi.
pub const ENTER_BUG_FORM: &str = ".enter_bug_form";
/// Field the tracker uses for "remember values as bookmarkable template"; never submitted.
pub const SENTINEL_FIELD: &str = "maketemplate";
pub const TARGET_RELEASE_FIELD: &str = "target_release";

/// Field name -> value mapping for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FormFields {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scrapes every named input, select and textarea under `container`.
///
/// Inputs contribute their `value` attribute (empty if absent). Selects
/// contribute the value of their `selected` option and are omitted when no
/// option is selected. Textareas contribute their text. Kinds are collected
/// in that order, each in document order, so a later element overwrites an
/// earlier field of the same name. `maketemplate` is always dropped.
/// A document without `container` yields an empty mapping.
pub fn scrape_form(html: &str, container: &str) -> Result<FormFields, CloneError> {
    Ok(scrape_form_in(html, container)?.unwrap_or_default())
}

/// Builds the new-bug submission from a clone page: scrape, then force `target_release`.
/// Returns `None` when the page has no `.enter_bug_form` at all.
pub fn clone_submission(html: &str, target_release: &str) -> Result<Option<FormFields>, CloneError> {
    let Some(mut fields) = scrape_form_in(html, ENTER_BUG_FORM)? else {
        return Ok(None);
    };
    fields.insert(TARGET_RELEASE_FIELD, target_release);
    Ok(Some(fields))
}

fn scrape_form_in(html: &str, container: &str) -> Result<Option<FormFields>, CloneError> {
    let container_sel = selector(container)?;
    let input_sel = selector(&format!("{} input", container))?;
    let select_sel = selector(&format!("{} select", container))?;
    let option_sel = selector("option")?;
    let textarea_sel = selector(&format!("{} textarea", container))?;

    let doc = Html::parse_document(html);
    let forms = doc.select(&container_sel).count();
    if forms == 0 {
        return Ok(None);
    }
    let mut fields = FormFields::new();

    for input in doc.select(&input_sel) {
        let Some(name) = input.value().attr("name") else {
            continue;
        };
        fields.insert(name, input.value().attr("value").unwrap_or(""));
    }

    for select in doc.select(&select_sel) {
        let Some(name) = select.value().attr("name") else {
            continue;
        };
        for option in select.select(&option_sel) {
            if option.value().attr("selected").is_none() {
                continue;
            }
            fields.insert(name, option.value().attr("value").unwrap_or(""));
        }
    }

    for textarea in doc.select(&textarea_sel) {
        let Some(name) = textarea.value().attr("name") else {
            continue;
        };
        fields.insert(name, textarea.text().collect::<String>());
    }

    fields.remove(SENTINEL_FIELD);
    tracing::debug!(forms, fields = fields.len(), "scraped form");
    Ok(Some(fields))
}
