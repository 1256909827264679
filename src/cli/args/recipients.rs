//! Recipient selection arguments for transfer commands

use clap::Args;

use crate::error::{Error, Result};
use crate::selection::SelectionEntry;

/// Recipients picked on the command line.
///
/// When all lists are empty the transfer command prompts interactively.
#[derive(Args, Debug, Default, Clone)]
pub struct RecipientArgs {
    /// Main handler user IDs, comma-separated or repeated
    #[arg(long, short = 'm', value_delimiter = ',')]
    pub main: Vec<u64>,

    /// For-information user IDs, comma-separated or repeated
    #[arg(long, short = 'k', value_delimiter = ',')]
    pub to_know: Vec<u64>,

    /// Main handler organization IDs
    #[arg(long, value_delimiter = ',')]
    pub main_org: Vec<u64>,

    /// For-information organization IDs
    #[arg(long, value_delimiter = ',')]
    pub to_know_org: Vec<u64>,
}

impl RecipientArgs {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
            && self.to_know.is_empty()
            && self.main_org.is_empty()
            && self.to_know_org.is_empty()
    }

    /// Seed entries for the main and to-know lists, in flag order.
    ///
    /// A node may be named under one classification only. Names are
    /// placeholders until the dialog matches the entries against its tree.
    pub fn receivers(&self) -> Result<(Vec<SelectionEntry>, Vec<SelectionEntry>)> {
        for id in &self.main {
            if self.to_know.contains(id) {
                return Err(Error::Other(format!(
                    "User {} is listed as both main handler and for information",
                    id
                )));
            }
        }
        for id in &self.main_org {
            if self.to_know_org.contains(id) {
                return Err(Error::Other(format!(
                    "Organization {} is listed as both main handler and for information",
                    id
                )));
            }
        }

        let main = entries(&self.main, &self.main_org);
        let to_know = entries(&self.to_know, &self.to_know_org);
        Ok((main, to_know))
    }
}

fn entries(users: &[u64], orgs: &[u64]) -> Vec<SelectionEntry> {
    users
        .iter()
        .map(|&id| SelectionEntry::user(id, format!("#{}", id)))
        .chain(
            orgs.iter()
                .map(|&id| SelectionEntry::org(id, format!("#{}", id))),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receivers_keep_flag_order() {
        let args = RecipientArgs {
            main: vec![10, 11],
            to_know: vec![12],
            main_org: vec![],
            to_know_org: vec![3],
        };

        let (main, to_know) = args.receivers().unwrap();
        assert_eq!(
            main,
            vec![SelectionEntry::user(10, "#10"), SelectionEntry::user(11, "#11")]
        );
        assert_eq!(
            to_know,
            vec![SelectionEntry::user(12, "#12"), SelectionEntry::org(3, "#3")]
        );
    }

    #[test]
    fn test_overlap_is_rejected() {
        let args = RecipientArgs {
            main: vec![10],
            to_know: vec![10],
            ..Default::default()
        };

        let err = args.receivers().unwrap_err();
        assert!(err.to_string().contains("User 10"));
    }

    #[test]
    fn test_is_empty() {
        assert!(RecipientArgs::default().is_empty());
        assert!(
            !RecipientArgs {
                to_know_org: vec![1],
                ..Default::default()
            }
            .is_empty()
        );
    }
}
