//! Line-oriented replay scripts: declare a page and a sequence of events to
//! feed through the hooks. Used by the integration tests, the benches, and
//! the replay CLI.
//!
//! ```text
//! ; comment
//! [page]
//! html = rtl
//!
//! [element editor]
//! kind = textarea
//! align = start
//!
//! [events]
//! focus editor
//! down ControlLeft
//! down ShiftRight
//! up ShiftRight
//! input editor שלום
//! ```

use crate::hooks::DocumentHooks;
use crate::keymap;
use crate::page::{Element, Page};
use crate::types::{
    ControlKind, Direction, DirectionChange, DomEvent, KeyCode, KeyEdge, KeyEvent, LogicalKey,
    Modifiers, NodeId, TextAlign,
};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// A parsed replay script: the page it builds and the events to feed through.
#[derive(Debug)]
pub struct Script {
    pub page: Page,
    pub names: HashMap<String, NodeId>,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }
}

/// One scripted step. `Edit` carries the new value so replay can apply the
/// edit before dispatching, the way a browser fires `input` after the change.
#[derive(Debug, Clone)]
pub enum ScriptEvent {
    Key(KeyEvent),
    Edit { target: NodeId, value: String },
    Focus { target: Option<NodeId> },
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown directive `{found}`")]
    UnknownDirective { line: usize, found: String },
    #[error("line {line}: unknown element `{name}`")]
    UnknownElement { line: usize, name: String },
    #[error("line {line}: bad value `{value}` for `{field}`")]
    BadValue {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Load a script file. BOM-marked files decode per their BOM; anything else
/// is treated as UTF-8.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Script> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode_script_bytes(&raw);
    let script = parse_script(text.as_ref())
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(script)
}

fn decode_script_bytes(raw: &[u8]) -> Cow<'_, str> {
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(raw) {
        debug!("decoded script using BOM: {}", enc.name());
        let (cow, _, had_errors) = enc.decode(&raw[bom_len..]);
        if had_errors {
            warn!("script decode had errors (replacement characters used)");
        }
        return Cow::Owned(cow.into_owned());
    }
    String::from_utf8_lossy(raw)
}

enum Section {
    Preamble,
    Page,
    Element(String, Element),
    Events,
}

pub fn parse_script(content: &str) -> std::result::Result<Script, ScriptError> {
    let mut page = Page::new();
    let mut names: HashMap<String, NodeId> = HashMap::new();
    let mut events = Vec::new();

    let mut section = Section::Preamble;
    // Parser-side mirrors of browser state while reading [events]: held
    // modifiers and the focused element, so emitted key events carry the
    // flags and target a real dispatch would.
    let mut mods = Modifiers::none();
    let mut focused: Option<NodeId> = None;

    let flush = |page: &mut Page, names: &mut HashMap<String, NodeId>, section: Section| {
        if let Section::Element(name, element) = section {
            let id = page.insert(element);
            if names.insert(name.clone(), id).is_some() {
                warn!(name = %name, "element redefined, later definition wins");
            }
        }
    };

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            let inner = line[1..line.len() - 1].trim();
            let next = if inner == "page" {
                Section::Page
            } else if inner == "events" {
                Section::Events
            } else if let Some(name) = inner.strip_prefix("element ") {
                Section::Element(name.trim().to_string(), Element::new(ControlKind::Input))
            } else {
                return Err(ScriptError::UnknownDirective {
                    line: line_no,
                    found: inner.to_string(),
                });
            };
            flush(&mut page, &mut names, std::mem::replace(&mut section, next));
            continue;
        }

        match section {
            Section::Preamble => {
                return Err(ScriptError::UnknownDirective {
                    line: line_no,
                    found: line.to_string(),
                });
            }
            Section::Page => {
                let (field, value) = split_assignment(line, line_no)?;
                let dir = Direction::from_css(value).ok_or(ScriptError::BadValue {
                    line: line_no,
                    field: "direction",
                    value: value.to_string(),
                })?;
                match field {
                    "html" => page.html.attribute = Some(dir),
                    "body" => page.body.attribute = Some(dir),
                    "html-computed" => page.html.computed = dir,
                    "body-computed" => page.body.computed = dir,
                    _ => {
                        return Err(ScriptError::UnknownDirective {
                            line: line_no,
                            found: field.to_string(),
                        });
                    }
                }
            }
            Section::Element(_, ref mut element) => {
                let (field, value) = split_assignment(line, line_no)?;
                match field {
                    "kind" => {
                        element.kind = parse_kind(value).ok_or(ScriptError::BadValue {
                            line: line_no,
                            field: "kind",
                            value: value.to_string(),
                        })?;
                    }
                    "align" => {
                        element.sheet_align =
                            TextAlign::from_css(value).ok_or(ScriptError::BadValue {
                                line: line_no,
                                field: "align",
                                value: value.to_string(),
                            })?;
                    }
                    "value" => {
                        element.value = value.to_string();
                    }
                    _ => {
                        return Err(ScriptError::UnknownDirective {
                            line: line_no,
                            found: field.to_string(),
                        });
                    }
                }
            }
            Section::Events => {
                let (directive, rest) = match line.split_once(char::is_whitespace) {
                    Some((d, r)) => (d, r.trim_start()),
                    None => (line, ""),
                };
                match directive {
                    "focus" => {
                        focused = if rest == "-" || rest.is_empty() {
                            None
                        } else {
                            Some(lookup(&names, rest, line_no)?)
                        };
                        events.push(ScriptEvent::Focus { target: focused });
                    }
                    "down" | "up" => {
                        if rest.is_empty() {
                            return Err(ScriptError::BadValue {
                                line: line_no,
                                field: "code",
                                value: String::new(),
                            });
                        }
                        let code = KeyCode::from(rest);
                        let key = keymap::logical_for_code(&code);
                        let edge = if directive == "down" {
                            KeyEdge::Down
                        } else {
                            KeyEdge::Up
                        };
                        apply_modifier(&mut mods, key, edge == KeyEdge::Down);
                        events.push(ScriptEvent::Key(KeyEvent {
                            code,
                            key,
                            mods,
                            edge,
                            target: focused,
                        }));
                    }
                    "input" => {
                        let (name, text) = match rest.split_once(char::is_whitespace) {
                            Some((n, t)) => (n, t.trim_start()),
                            None => (rest, ""),
                        };
                        let target = lookup(&names, name, line_no)?;
                        events.push(ScriptEvent::Edit {
                            target,
                            value: text.to_string(),
                        });
                    }
                    _ => {
                        return Err(ScriptError::UnknownDirective {
                            line: line_no,
                            found: directive.to_string(),
                        });
                    }
                }
            }
        }
    }
    flush(&mut page, &mut names, section);

    debug!(
        elements = names.len(),
        events = events.len(),
        "script parsed"
    );
    Ok(Script {
        page,
        names,
        events,
    })
}

/// Drive a parsed script through the hooks, collecting every direction change.
pub fn replay(script: &mut Script, hooks: &DocumentHooks) -> Vec<DirectionChange> {
    let mut changes = Vec::new();
    let events = script.events.clone();
    for event in events {
        let change = match event {
            ScriptEvent::Key(key) => {
                let dom = match key.edge {
                    KeyEdge::Down => DomEvent::KeyDown(key),
                    KeyEdge::Up => DomEvent::KeyUp(key),
                };
                hooks.dispatch(&mut script.page, &dom)
            }
            ScriptEvent::Edit { target, value } => {
                script.page.set_value(target, value);
                hooks.dispatch(&mut script.page, &DomEvent::Input { target })
            }
            ScriptEvent::Focus { target } => {
                hooks.dispatch(&mut script.page, &DomEvent::FocusChange { target })
            }
        };
        changes.extend(change);
    }
    changes
}

fn split_assignment(line: &str, line_no: usize) -> std::result::Result<(&str, &str), ScriptError> {
    line.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or(ScriptError::UnknownDirective {
            line: line_no,
            found: line.to_string(),
        })
}

fn lookup(
    names: &HashMap<String, NodeId>,
    name: &str,
    line_no: usize,
) -> std::result::Result<NodeId, ScriptError> {
    names.get(name).copied().ok_or(ScriptError::UnknownElement {
        line: line_no,
        name: name.to_string(),
    })
}

fn parse_kind(value: &str) -> Option<ControlKind> {
    match value {
        "input" => Some(ControlKind::Input),
        "password" => Some(ControlKind::Password),
        "textarea" => Some(ControlKind::TextArea),
        "contenteditable" => Some(ControlKind::ContentEditable),
        "static" => Some(ControlKind::Static),
        _ => None,
    }
}

fn apply_modifier(mods: &mut Modifiers, key: LogicalKey, pressed: bool) {
    match key {
        LogicalKey::Control => mods.ctrl = pressed,
        LogicalKey::Shift => mods.shift = pressed,
        LogicalKey::Alt => mods.alt = pressed,
        LogicalKey::Meta => mods.meta = pressed,
        _ => {}
    }
}
