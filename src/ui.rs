//! Render tree produced by views.
//!
//! A [`Page`] is what a browser component would have put in the DOM:
//! headings, text, label/value fields, tables with per-row buttons, and
//! buttons carrying the [`Action`] a click would trigger. The CLI prints it
//! through `Display`; tests query it by text and button label.

use std::fmt;

use crate::models::DecisionStatus;
use crate::routes::Route;

/// What pressing a button does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    /// Re-run the view's load after a failure.
    Retry,
    DeleteAdmission { application_id: String },
    DeletePayment { payment_id: String },
    FilterCollege(Option<String>),
    FilterStatus(Option<DecisionStatus>),
    SubmitPayment { amount: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Info,
    Danger,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub style: ButtonStyle,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, style: ButtonStyle, action: Action) -> Self {
        Self {
            label: label.into(),
            style,
            action,
        }
    }

    pub fn navigate(label: impl Into<String>, style: ButtonStyle, route: Route) -> Self {
        Self::new(label, style, Action::Navigate(route))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub actions: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>, actions: Vec<Button>) {
        self.rows.push(Row { cells, actions });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Heading(String),
    Text(String),
    /// Error or validation message shown above the content.
    Notice(String),
    Field { label: String, value: String },
    Select {
        label: String,
        options: Vec<String>,
        selected: usize,
    },
    Table(Table),
    Button(Button),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub title: String,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Element::Heading(text.into()))
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Element::Text(text.into()))
    }

    pub fn notice(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Element::Notice(text.into()))
    }

    /// Missing values render as `-` rather than being dropped.
    pub fn field(&mut self, label: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.push(Element::Field {
            label: label.into(),
            value: value.unwrap_or("-").to_string(),
        })
    }

    pub fn button(&mut self, button: Button) -> &mut Self {
        self.push(Element::Button(button))
    }

    /// Every visible text node in document order. Field labels and values
    /// are separate nodes, as are table headers and cells.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for element in &self.elements {
            match element {
                Element::Heading(t) | Element::Text(t) | Element::Notice(t) => out.push(t.as_str()),
                Element::Field { label, value } => {
                    out.push(label.as_str());
                    out.push(value.as_str());
                }
                Element::Select { label, options, .. } => {
                    out.push(label.as_str());
                    out.extend(options.iter().map(String::as_str));
                }
                Element::Table(table) => {
                    out.extend(table.headers.iter().map(String::as_str));
                    for row in &table.rows {
                        out.extend(row.cells.iter().map(String::as_str));
                    }
                }
                Element::Button(_) => {}
            }
        }
        out
    }

    /// Exact match against a single text node.
    pub fn has_text(&self, text: &str) -> bool {
        self.texts().iter().any(|t| *t == text)
    }

    /// Case-insensitive substring match across text nodes.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.texts().iter().any(|t| t.to_lowercase().contains(&needle))
    }

    pub fn headings(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Heading(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All buttons in document order, including those inside table rows.
    pub fn buttons(&self) -> Vec<&Button> {
        let mut out = Vec::new();
        for element in &self.elements {
            match element {
                Element::Button(b) => out.push(b),
                Element::Table(table) => {
                    for row in &table.rows {
                        out.extend(row.actions.iter());
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// The `index`-th button (0-based) carrying `label`.
    pub fn button_labeled(&self, label: &str, index: usize) -> Option<&Button> {
        self.buttons()
            .into_iter()
            .filter(|b| b.label == label)
            .nth(index)
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count().max(1)))?;
        for element in &self.elements {
            match element {
                Element::Heading(t) => writeln!(f, "\n## {t}")?,
                Element::Text(t) => writeln!(f, "{t}")?,
                Element::Notice(t) => writeln!(f, "! {t}")?,
                Element::Field { label, value } => writeln!(f, "{label}: {value}")?,
                Element::Select {
                    label,
                    options,
                    selected,
                } => {
                    let rendered: Vec<String> = options
                        .iter()
                        .enumerate()
                        .map(|(i, o)| if i == *selected { format!("<{o}>") } else { o.clone() })
                        .collect();
                    writeln!(f, "{label}: {}", rendered.join(" | "))?;
                }
                Element::Table(table) => write_table(f, table)?,
                Element::Button(b) => writeln!(f, "[{}]", b.label)?,
            }
        }
        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &Table) -> fmt::Result {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(f, "{}", line(&table.headers))?;
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
    writeln!(f, "{}", "-".repeat(total))?;
    for row in &table.rows {
        let actions: Vec<String> = row.actions.iter().map(|b| format!("[{}]", b.label)).collect();
        if actions.is_empty() {
            writeln!(f, "{}", line(&row.cells))?;
        } else {
            writeln!(f, "{}   {}", line(&row.cells), actions.join(" "))?;
        }
    }
    Ok(())
}
