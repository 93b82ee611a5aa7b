//! In-memory record of generated addresses.

use super::Subnet;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// One successful generation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// The subnet as the user typed it.
    pub subnet: String,
    /// The network it was parsed into.
    pub network: Subnet,
    /// The address that was handed out.
    pub address: Ipv4Addr,
    pub generated_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(subnet: &str, network: Subnet, address: Ipv4Addr) -> HistoryEntry {
        HistoryEntry {
            subnet: subnet.to_string(),
            network,
            address,
            generated_at: Local::now(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subnet: {} → IP: {}", self.subnet, self.address)
    }
}

/// Append-only list of generations, oldest first.
///
/// Lives only as long as the process; [`History::clear`] is the only way
/// entries are removed.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> History {
        History {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        log::debug!("history[{}] = {entry}", self.entries.len());
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} history entries", self.entries.len());
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cidr: &str, last_octet: u8) -> HistoryEntry {
        let network = Subnet::parse(cidr).unwrap();
        let [a, b, c, _] = network.network().octets();
        HistoryEntry::new(cidr, network, Ipv4Addr::new(a, b, c, last_octet))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut history = History::new();
        assert!(history.is_empty());

        history.push(entry("10.0.0.0/24", 1));
        history.push(entry("10.0.1.0/24", 2));
        history.push(entry("10.0.0.0/24", 3));

        assert_eq!(history.len(), 3);
        let addrs: Vec<String> = history
            .entries()
            .iter()
            .map(|e| e.address.to_string())
            .collect();
        assert_eq!(addrs, vec!["10.0.0.1", "10.0.1.2", "10.0.0.3"]);
        assert!(history.entries()[0].generated_at <= history.entries()[2].generated_at);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(entry("192.168.0.0/16", 9));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.entries().len(), 0);
    }

    #[test]
    fn test_entry_display() {
        let e = entry("192.168.1.0/24", 42);
        assert_eq!(e.to_string(), "Subnet: 192.168.1.0/24 → IP: 192.168.1.42");
    }

    #[test]
    fn test_entry_serialize() {
        let e = entry("192.168.1.7/24", 42);
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["subnet"], "192.168.1.7/24");
        assert_eq!(value["network"], "192.168.1.0/24");
        assert_eq!(value["address"], "192.168.1.42");
        assert!(value["generated_at"].is_string());
    }
}
