// Replay - drive the plugin over a scripted session
//
// A replay script is a `World` fixture plus the host events of one session,
// in order. Replay runs the full plugin lifecycle against a `SimHost`
// (start_up, every event, shut_down) and produces one record per step:
// what the menu looked like afterwards, what the plugin asked the host to
// do, and which diagnostics it logged while doing it.
//
// Records are written as JSON Lines, one object per line.

use crate::events::HostEvent;
use crate::host::{HostCall, MenuEntries, MenuEntry, SimHost, World};
use crate::logging::{LogBuffer, LogEntry};
use crate::plugin::{ClickOutcome, LookupPlugin};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A recorded session to replay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub world: World,
    pub events: Vec<HostEvent>,
}

impl ReplayScript {
    /// Load a script from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse replay script {}", path.display()))
    }
}

/// Outcome of one replay step
#[derive(Debug, Clone, Serialize)]
pub struct ReplayRecord {
    pub seq: usize,
    pub timestamp: DateTime<Utc>,
    /// `start_up`, `shut_down`, or the event kind
    pub step: &'static str,
    /// The event as the plugin left it (clicks show `consumed`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<HostEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickOutcome>,
    /// Armed state after the step
    pub armed: bool,
    /// Menu entries after the step
    pub menu: Vec<MenuEntry>,
    /// Host calls made during the step
    pub calls: Vec<HostCall>,
    pub opened_urls: Vec<String>,
    /// Log events captured during the step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<LogEntry>,
}

/// Runs scripts through a plugin and a simulated host
pub struct Replayer<'a> {
    plugin: LookupPlugin,
    notes: Option<&'a LogBuffer>,
}

impl<'a> Replayer<'a> {
    pub fn new(plugin: LookupPlugin) -> Self {
        Self {
            plugin,
            notes: None,
        }
    }

    /// Attach diagnostics from this buffer to each record. The buffer must be
    /// fed by a [`crate::logging::NoteLayer`] on the active subscriber.
    pub fn with_notes(mut self, notes: &'a LogBuffer) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn run(mut self, script: ReplayScript) -> Vec<ReplayRecord> {
        let mut host = SimHost::new(script.world);
        let mut records = Vec::with_capacity(script.events.len() + 2);

        // Earlier output would otherwise land on the first record
        if let Some(notes) = self.notes {
            notes.clear();
        }

        self.plugin.start_up(&mut host);
        records.push(self.record(&mut host, records.len(), "start_up", None, None));

        for mut event in script.events {
            let step = event.kind();
            let click = match &mut event {
                HostEvent::MenuEntryAdded(added) => {
                    // The host appends the entry before it notifies
                    host.push_menu_entry(added.to_entry());
                    self.plugin.on_menu_entry_added(&mut host, added);
                    None
                }
                HostEvent::MenuOptionClicked(click) => {
                    Some(self.plugin.on_menu_option_clicked(&mut host, click))
                }
                other => {
                    self.plugin.handle_event(&mut host, other);
                    None
                }
            };

            let record = self.record(&mut host, records.len(), step, Some(event), click.clone());
            records.push(record);

            // A click closes the menu
            if click.is_some() {
                host.reset_menu();
            }
        }

        self.plugin.shut_down(&mut host);
        records.push(self.record(&mut host, records.len(), "shut_down", None, None));

        tracing::info!(steps = records.len(), "Replay finished");
        records
    }

    fn record(
        &self,
        host: &mut SimHost,
        seq: usize,
        step: &'static str,
        event: Option<HostEvent>,
        click: Option<ClickOutcome>,
    ) -> ReplayRecord {
        let calls = host.drain_calls();
        let opened_urls = calls
            .iter()
            .filter_map(|c| match c {
                HostCall::OpenUrl { url } => Some(url.clone()),
                _ => None,
            })
            .collect();

        ReplayRecord {
            seq,
            timestamp: Utc::now(),
            step,
            event,
            click,
            armed: self.plugin.is_armed(),
            menu: host.menu_entries(),
            calls,
            opened_urls,
            diagnostics: self.notes.map(LogBuffer::drain).unwrap_or_default(),
        }
    }
}

/// Write records as JSON Lines
pub fn write_jsonl<W: Write>(records: &[ReplayRecord], mut out: W) -> Result<()> {
    for record in records {
        let json = serde_json::to_string(record).context("Failed to serialize replay record")?;
        writeln!(out, "{}", json).context("Failed to write replay record")?;
    }
    out.flush().context("Failed to flush replay output")?;
    Ok(())
}

/// Write records to `path`, creating parent directories as needed
pub fn write_report(records: &[ReplayRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_jsonl(records, BufWriter::new(file))
}
