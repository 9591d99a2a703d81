//! Client picker with live filtering.
//!
//! The picker is split into the text typed by the user and the candidate list
//! currently shown under it. Selection is tracked separately from the text: a
//! client is only selected once a candidate is picked, or once the text is
//! resolved against the client labels.

use crate::domain::client::Client;

/// A client paired with the label shown in the picker.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientItem {
    client: Client,
    label: String,
}

impl ClientItem {
    pub fn new(client: Client) -> Self {
        let label = client.display_label();
        Self { client, label }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Key that triggered an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKey {
    Enter,
    Up,
    Down,
    /// Any key that may have changed the text.
    Edit,
}

#[derive(Debug)]
pub struct ClientSearch {
    items: Vec<ClientItem>,
    /// Indexes into `items` of the visible candidates.
    visible: Vec<usize>,
    text: String,
    selected: Option<usize>,
    highlighted: Option<usize>,
}

impl ClientSearch {
    /// Builds the picker showing every client in the given order.
    pub fn new(clients: Vec<Client>) -> Self {
        let items: Vec<ClientItem> = clients.into_iter().map(ClientItem::new).collect();
        let visible = (0..items.len()).collect();
        Self {
            items,
            visible,
            text: String::new(),
            selected: None,
            highlighted: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Currently visible candidates, in original order.
    pub fn candidates(&self) -> impl Iterator<Item = &ClientItem> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn selected(&self) -> Option<&ClientItem> {
        self.selected.map(|i| &self.items[i])
    }

    /// Position of the highlighted candidate within [`Self::candidates`].
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Handles a key release in the text input.
    ///
    /// Navigation keys move the highlight (Up/Down) or commit it (Enter) and
    /// never refilter. Any other key takes `text` as the new query.
    pub fn on_key_released(&mut self, text: &str, key: InputKey) {
        match key {
            InputKey::Up => {
                self.highlighted = match self.highlighted {
                    Some(pos) => Some(pos.saturating_sub(1)),
                    None if !self.visible.is_empty() => Some(0),
                    None => None,
                };
            }
            InputKey::Down => {
                if let Some(last) = self.visible.len().checked_sub(1) {
                    self.highlighted = Some(self.highlighted.map_or(0, |pos| (pos + 1).min(last)));
                }
            }
            InputKey::Enter => {
                if let Some(pos) = self.highlighted {
                    self.select(pos);
                }
            }
            InputKey::Edit => self.set_query(text),
        }
    }

    /// Replaces the query and refilters the candidates.
    ///
    /// The typed text is kept as is. A selection survives only while the
    /// text still equals its label.
    pub fn set_query(&mut self, text: &str) {
        self.text = text.to_string();
        self.filter();
        if self
            .selected()
            .is_some_and(|item| item.label() != self.text)
        {
            self.selected = None;
        }
    }

    fn filter(&mut self) {
        let query = self.text.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.label.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.highlighted = None;
    }

    /// Selects the candidate at `position` in the visible list.
    ///
    /// The text becomes the candidate's label. Returns `false` when the
    /// position is out of range.
    pub fn select(&mut self, position: usize) -> bool {
        let Some(&index) = self.visible.get(position) else {
            return false;
        };
        self.selected = Some(index);
        self.highlighted = Some(position);
        self.text = self.items[index].label.clone();
        true
    }

    /// Selects the client with the given id, whether visible or not.
    pub fn select_client(&mut self, client_id: i32) -> bool {
        let Some(index) = self.items.iter().position(|item| item.client.id.get() == client_id)
        else {
            return false;
        };
        self.selected = Some(index);
        self.text = self.items[index].label.clone();
        true
    }

    /// Resolves the client the user means.
    ///
    /// The explicit selection wins. Otherwise the text, as typed, must equal
    /// the label of exactly one client, ignoring case; that client becomes
    /// selected.
    /// No match or several matches resolve to nothing.
    pub fn resolve(&mut self) -> Option<&ClientItem> {
        if self.selected.is_none() {
            let text = self.text.to_lowercase();
            let matches: Vec<usize> = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.label.to_lowercase() == text)
                .map(|(i, _)| i)
                .collect();
            if let [index] = matches[..] {
                self.selected = Some(index);
            }
        }
        self.selected()
    }
}
