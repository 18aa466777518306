use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Block {
    pub first: u32,
    pub last: u32,
    /// Bounds as written in the source, used for file names and display.
    pub first_hex: String,
    pub last_hex: String,
    pub name: String,
}

/// Code point → block position, kept as sorted ranges instead of one entry
/// per code point.
#[derive(Debug, Default)]
pub struct BlockIndex {
    // (first, last, position in `blocks`), sorted by `first`
    ranges: Vec<(u32, u32, usize)>,
}

impl BlockIndex {
    pub fn build(blocks: &[Block]) -> Result<Self> {
        let mut ranges: Vec<(u32, u32, usize)> = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.first, b.last, i))
            .collect();
        ranges.sort_unstable_by_key(|r| r.0);

        for pair in ranges.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.0 <= a.1 {
                return Err(Error::DataConsistency(format!(
                    "blocks {:?} and {:?} overlap",
                    blocks[a.2].name, blocks[b.2].name
                )));
            }
        }
        Ok(Self { ranges })
    }

    pub fn lookup(&self, cp: u32) -> Option<usize> {
        let i = self.ranges.partition_point(|r| r.0 <= cp);
        let (_, last, idx) = *self.ranges.get(i.checked_sub(1)?)?;
        (cp <= last).then_some(idx)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn block(first: u32, last: u32, name: &str) -> Block {
        Block {
            first,
            last,
            first_hex: format!("{:04X}", first),
            last_hex: format!("{:04X}", last),
            name: name.to_string(),
        }
    }

    #[test]
    fn lookup_follows_source_order_positions() {
        // source order deliberately not numeric
        let blocks = vec![
            block(0x0100, 0x017F, "Latin Extended-A"),
            block(0x0000, 0x007F, "Basic Latin"),
            block(0x20000, 0x2A6DF, "CJK Unified Ideographs Extension B"),
        ];
        let idx = BlockIndex::build(&blocks).unwrap();
        assert_eq!(idx.lookup(0x0041), Some(1));
        assert_eq!(idx.lookup(0x0100), Some(0));
        assert_eq!(idx.lookup(0x017F), Some(0));
        assert_eq!(idx.lookup(0x2A6DF), Some(2));
    }

    #[test]
    fn gaps_and_out_of_range_are_none() {
        let blocks = vec![block(0x0000, 0x007F, "Basic Latin"), block(0x0100, 0x017F, "Latin Extended-A")];
        let idx = BlockIndex::build(&blocks).unwrap();
        assert_eq!(idx.lookup(0x0080), None);
        assert_eq!(idx.lookup(0x00FF), None);
        assert_eq!(idx.lookup(0x10FFFF), None);
    }

    #[test]
    fn every_code_point_maps_to_its_block() {
        let blocks = vec![block(0x0000, 0x007F, "Basic Latin"), block(0x0080, 0x00FF, "Latin-1 Supplement")];
        let idx = BlockIndex::build(&blocks).unwrap();
        for (i, b) in blocks.iter().enumerate() {
            for cp in b.first..=b.last {
                assert_eq!(idx.lookup(cp), Some(i));
            }
        }
    }

    #[test]
    fn overlapping_blocks_rejected() {
        let blocks = vec![block(0x0000, 0x007F, "A"), block(0x0070, 0x00FF, "B")];
        let err = BlockIndex::build(&blocks).unwrap_err();
        assert!(matches!(err, Error::DataConsistency(_)));
    }

    #[test]
    fn empty_index() {
        let idx = BlockIndex::build(&[]).unwrap();
        assert_eq!(idx.lookup(0), None);
    }
}
