//! WebForms page model.
//!
//! The portal's query page is a classic ASP.NET form: every interaction is
//! a POST of the page's hidden state (`__VIEWSTATE` and friends) plus the
//! current value of every input, with `__EVENTTARGET` naming the control
//! that "fired". This module parses one response into that model and
//! builds the bodies for the next postback or submit.

use std::collections::HashMap;

use scraper::{Html, Selector};

use crate::error::ScrapeError;

const VIEWSTATE_FIELD: &str = "__VIEWSTATE";
const EVENT_TARGET_FIELD: &str = "__EVENTTARGET";
const EVENT_ARGUMENT_FIELD: &str = "__EVENTARGUMENT";

/// One `<option>` of a `<select>`: the submitted value and the visible
/// text that selection matching runs against.
#[derive(Debug, Clone)]
pub(crate) struct SelectOption {
    pub value: String,
    pub text: String,
}

/// Parsed form state of one page load.
#[derive(Debug)]
pub(crate) struct FormPage {
    /// Hidden inputs in document order, minus the event fields (those are
    /// emitted explicitly by the body builders).
    hidden: Vec<(String, String)>,
    /// Text inputs in document order; `set_text` overrides in place.
    text_inputs: Vec<(String, String)>,
    selects: HashMap<String, Vec<SelectOption>>,
    /// Current value per select: the server-marked selection, overridden
    /// by `set_select`.
    selected: HashMap<String, String>,
    select_order: Vec<String>,
}

impl FormPage {
    /// Parse a page into form state.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::MalformedPage`] when the page carries no
    /// `__VIEWSTATE` — without it no postback can round-trip, so the
    /// response is not the query form (an outage page, a block page).
    pub fn parse(html: &str) -> Result<Self, ScrapeError> {
        let doc = Html::parse_document(html);

        let input_sel = Selector::parse("input").expect("valid selector");
        let mut hidden = Vec::new();
        let mut text_inputs = Vec::new();
        for input in doc.select(&input_sel) {
            let Some(name) = input.value().attr("name").or_else(|| input.value().attr("id"))
            else {
                continue;
            };
            let value = input.value().attr("value").unwrap_or("").to_owned();
            match input.value().attr("type").unwrap_or("text") {
                "hidden" => {
                    if name != EVENT_TARGET_FIELD && name != EVENT_ARGUMENT_FIELD {
                        hidden.push((name.to_owned(), value));
                    }
                }
                "text" => text_inputs.push((name.to_owned(), value)),
                _ => {}
            }
        }

        if !hidden.iter().any(|(name, _)| name == VIEWSTATE_FIELD) {
            return Err(ScrapeError::MalformedPage {
                element: VIEWSTATE_FIELD.to_owned(),
            });
        }

        let select_sel = Selector::parse("select").expect("valid selector");
        let option_sel = Selector::parse("option").expect("valid selector");
        let mut selects = HashMap::new();
        let mut selected = HashMap::new();
        let mut select_order = Vec::new();
        for select in doc.select(&select_sel) {
            let Some(name) = select
                .value()
                .attr("name")
                .or_else(|| select.value().attr("id"))
            else {
                continue;
            };
            let mut options = Vec::new();
            let mut current: Option<String> = None;
            for option in select.select(&option_sel) {
                let text = option.text().collect::<String>().trim().to_owned();
                let value = option
                    .value()
                    .attr("value")
                    .map_or_else(|| text.clone(), str::to_owned);
                if option.value().attr("selected").is_some() {
                    current = Some(value.clone());
                }
                options.push(SelectOption { value, text });
            }
            let current =
                current.unwrap_or_else(|| options.first().map_or(String::new(), |o| o.value.clone()));
            select_order.push(name.to_owned());
            selects.insert(name.to_owned(), options);
            selected.insert(name.to_owned(), current);
        }

        Ok(Self {
            hidden,
            text_inputs,
            selects,
            selected,
            select_order,
        })
    }

    pub fn options(&self, select_name: &str) -> Option<&[SelectOption]> {
        self.selects.get(select_name).map(Vec::as_slice)
    }

    pub fn set_select(&mut self, select_name: &str, value: impl Into<String>) {
        self.selected.insert(select_name.to_owned(), value.into());
    }

    pub fn set_text(&mut self, input_name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self
            .text_inputs
            .iter_mut()
            .find(|(name, _)| name == input_name)
        {
            entry.1 = value;
        } else {
            self.text_inputs.push((input_name.to_owned(), value));
        }
    }

    /// Body for the postback a control fires when it changes.
    pub fn postback_body(&self, event_target: &str) -> Vec<(String, String)> {
        let mut body = vec![
            (EVENT_TARGET_FIELD.to_owned(), event_target.to_owned()),
            (EVENT_ARGUMENT_FIELD.to_owned(), String::new()),
        ];
        self.push_state(&mut body);
        body
    }

    /// Body for a plain submit-button post: no event target, the button's
    /// own name/value pair carries the action.
    pub fn submit_body(&self, button_name: &str, button_label: &str) -> Vec<(String, String)> {
        let mut body = vec![
            (EVENT_TARGET_FIELD.to_owned(), String::new()),
            (EVENT_ARGUMENT_FIELD.to_owned(), String::new()),
        ];
        self.push_state(&mut body);
        body.push((button_name.to_owned(), button_label.to_owned()));
        body
    }

    fn push_state(&self, body: &mut Vec<(String, String)>) {
        body.extend(self.hidden.iter().cloned());
        for name in &self.select_order {
            if let Some(value) = self.selected.get(name) {
                body.push((name.clone(), value.clone()));
            }
        }
        body.extend(self.text_inputs.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><form>
            <input type="hidden" name="__VIEWSTATE" value="vs123" />
            <input type="hidden" name="__EVENTVALIDATION" value="ev456" />
            <input type="hidden" name="__EVENTTARGET" value="" />
            <select name="ddlState">
                <option value="0">--Select--</option>
                <option value="PB" selected="selected">Punjab</option>
                <option value="HR">Haryana</option>
            </select>
            <input type="text" name="txtDate" value="" />
        </form></body></html>
    "#;

    #[test]
    fn parses_hidden_fields_and_options() {
        let page = FormPage::parse(PAGE).unwrap();
        let options = page.options("ddlState").unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[1].text, "Punjab");
        assert_eq!(options[1].value, "PB");
    }

    #[test]
    fn tracks_server_marked_selection() {
        let page = FormPage::parse(PAGE).unwrap();
        let body = page.postback_body("ddlState");
        assert!(body.contains(&("ddlState".to_owned(), "PB".to_owned())));
        assert!(body.contains(&("__VIEWSTATE".to_owned(), "vs123".to_owned())));
        assert!(body.contains(&("__EVENTTARGET".to_owned(), "ddlState".to_owned())));
    }

    #[test]
    fn set_select_overrides_server_selection() {
        let mut page = FormPage::parse(PAGE).unwrap();
        page.set_select("ddlState", "HR");
        let body = page.postback_body("ddlState");
        assert!(body.contains(&("ddlState".to_owned(), "HR".to_owned())));
    }

    #[test]
    fn submit_body_carries_button_not_event_target() {
        let mut page = FormPage::parse(PAGE).unwrap();
        page.set_text("txtDate", "01-Jan-2024");
        let body = page.submit_body("btnGo", "Go");
        assert!(body.contains(&("btnGo".to_owned(), "Go".to_owned())));
        assert!(body.contains(&("__EVENTTARGET".to_owned(), String::new())));
        assert!(body.contains(&("txtDate".to_owned(), "01-Jan-2024".to_owned())));
    }

    #[test]
    fn page_without_viewstate_is_malformed() {
        let result = FormPage::parse("<html><body>Service unavailable</body></html>");
        assert!(
            matches!(result, Err(ScrapeError::MalformedPage { ref element }) if element == "__VIEWSTATE")
        );
    }
}
