//! Term catalog - the fixed table of term/definition pairs

use serde::{Deserialize, Serialize};

use crate::core::types::PairId;

/// Topic group a pair belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ecosystem,
    Defi,
    Blockchain,
    Advanced,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Ecosystem,
        Category::Defi,
        Category::Blockchain,
        Category::Advanced,
    ];

    /// Display name shown in the category legend
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Ecosystem => "OneChain",
            Category::Defi => "DeFi",
            Category::Blockchain => "Blockchain",
            Category::Advanced => "Advanced",
        }
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermPair {
    pub pair_id: PairId,
    pub term: &'static str,
    pub definition: &'static str,
    pub category: Category,
}

const fn pair(
    id: char,
    term: &'static str,
    definition: &'static str,
    category: Category,
) -> TermPair {
    TermPair {
        pair_id: PairId(id),
        term,
        definition,
        category,
    }
}

pub static TERM_PAIRS: [TermPair; 19] = [
    // OneChain ecosystem
    pair(
        'A',
        "OneWallet",
        "Self-custody wallet with MPC security",
        Category::Ecosystem,
    ),
    pair(
        'B',
        "OneDEX",
        "Decentralized exchange for trading tokens",
        Category::Ecosystem,
    ),
    pair(
        'C',
        "USDO",
        "Yield-generating stablecoin on OneChain",
        Category::Ecosystem,
    ),
    pair(
        'D',
        "OneRWA",
        "Real World Assets platform on OneChain",
        Category::Ecosystem,
    ),
    pair(
        'E',
        "OneTransfer",
        "Cross-chain asset transfer protocol",
        Category::Ecosystem,
    ),
    pair(
        'F',
        "OneChain",
        "Layer-1 blockchain for decentralized apps",
        Category::Ecosystem,
    ),
    // DeFi
    pair(
        'G',
        "Staking",
        "Locking tokens to secure network and earn rewards",
        Category::Defi,
    ),
    pair(
        'H',
        "AMM",
        "Automated market maker using algorithms",
        Category::Defi,
    ),
    pair(
        'I',
        "Liquidity Pool",
        "Token reserves enabling decentralized trading",
        Category::Defi,
    ),
    pair(
        'J',
        "Yield Farming",
        "Earning rewards by providing liquidity",
        Category::Defi,
    ),
    pair(
        'K',
        "Bridge",
        "Protocol connecting different blockchains",
        Category::Defi,
    ),
    // Blockchain
    pair(
        'L',
        "Smart Contract",
        "Self-executing code with agreement terms",
        Category::Blockchain,
    ),
    pair(
        'M',
        "Gas Fee",
        "Cost to execute transactions on blockchain",
        Category::Blockchain,
    ),
    pair(
        'N',
        "Block",
        "Data structure containing transaction records",
        Category::Blockchain,
    ),
    pair(
        'O',
        "Consensus",
        "Agreement mechanism for validating transactions",
        Category::Blockchain,
    ),
    // Advanced
    pair(
        'P',
        "RWA",
        "Real World Assets represented on blockchain",
        Category::Advanced,
    ),
    pair(
        'Q',
        "MPC",
        "Multi-Party Computation for secure key management",
        Category::Advanced,
    ),
    pair(
        'R',
        "TVL",
        "Total Value Locked in DeFi protocols",
        Category::Advanced,
    ),
    pair(
        'S',
        "Slippage",
        "Price difference between expected and executed trade",
        Category::Advanced,
    ),
];

pub fn all() -> &'static [TermPair] {
    &TERM_PAIRS
}

pub fn get(pair_id: PairId) -> Option<&'static TermPair> {
    TERM_PAIRS.iter().find(|p| p.pair_id == pair_id)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static TermPair> {
    TERM_PAIRS.iter().filter(move |p| p.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Difficulty;
    use crate::game::constants::pairs_for;
    use std::collections::HashSet;

    #[test]
    fn test_pair_ids_unique() {
        let ids: HashSet<_> = all().iter().map(|p| p.pair_id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_catalog_covers_hardest_tier() {
        assert!(all().len() >= pairs_for(Difficulty::Hard) as usize);
    }

    #[test]
    fn test_every_category_populated() {
        for category in Category::ALL {
            assert!(by_category(category).count() > 0, "{:?} is empty", category);
        }
    }

    #[test]
    fn test_category_display_names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, ["OneChain", "DeFi", "Blockchain", "Advanced"]);
        assert_eq!(get(PairId('A')).unwrap().category.display_name(), "OneChain");
    }

    #[test]
    fn test_lookup() {
        let pair = get(PairId('H')).unwrap();
        assert_eq!(pair.term, "AMM");
        assert!(get(PairId('Z')).is_none());
    }
}
