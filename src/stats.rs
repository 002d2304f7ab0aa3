//! Summary statistics and distributions over a [`RecordCollection`].
//!
//! Every computation is a pure read of the collection and fails with
//! [`FastqError::EmptyCollection`] when there are no records. Per-read percentages are
//! averaged arithmetically across reads, not weighted by read length.

use crate::{
    collection::RecordCollection,
    error::{FastqError, Result},
    record::{FastqRecord, NUCLEOTIDES},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Quality means are bucketed at `1 / QUALITY_BUCKETS_PER_UNIT` resolution.
const QUALITY_BUCKETS_PER_UNIT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NucleotideComposition {
    pub a: f64,
    pub t: f64,
    pub g: f64,
    pub c: f64,
}

/// Base percentages at one read position, over the reads long enough to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionComposition {
    pub position: usize,
    pub a: f64,
    pub t: f64,
    pub g: f64,
    pub c: f64,
    pub n: f64,
}

/// Scalar outputs for one file; one row of the external report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_reads: usize,
    pub cut_records: usize,
    pub total_cuts: usize,
    pub length_mode: usize,
    pub mean_gc: f64,
    pub composition: NucleotideComposition,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Read Statistics Summary:")?;
        writeln!(f, "  Total reads: {}", self.total_reads)?;
        writeln!(f, "  Reads with adapters: {}", self.cut_records)?;
        writeln!(f, "  Adapters removed: {}", self.total_cuts)?;
        writeln!(f, "  Most frequent length: {}", self.length_mode)?;
        writeln!(f, "  Mean GC content: {:.2}%", self.mean_gc)?;
        write!(
            f,
            "  Mean composition: A {:.2}%  T {:.2}%  G {:.2}%  C {:.2}%",
            self.composition.a, self.composition.t, self.composition.g, self.composition.c
        )
    }
}

/// Everything the plotting layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub length_distribution: Vec<(usize, usize)>,
    pub gc_distribution: Vec<(usize, usize)>,
    pub position_composition: Vec<PositionComposition>,
    pub quality_per_read: Vec<(f64, usize)>,
    pub position_quality: Vec<(usize, f64)>,
}

impl RecordCollection {
    fn non_empty(&self) -> Result<&[FastqRecord]> {
        if self.is_empty() {
            Err(FastqError::EmptyCollection)
        } else {
            Ok(self.records())
        }
    }

    pub fn count(&self) -> Result<usize> {
        self.non_empty().map(|records| records.len())
    }

    /// Most frequent read length; ties go to the shortest length.
    pub fn length_mode(&self) -> Result<usize> {
        let counts = self.length_counts()?;

        let mut mode = (0, 0);
        for (&len, &count) in &counts {
            if count > mode.1 {
                mode = (len, count);
            }
        }
        Ok(mode.0)
    }

    pub fn average_gc_percent(&self) -> Result<f64> {
        let records = self.non_empty()?;
        Ok(records.iter().map(FastqRecord::gc_percent).sum::<f64>() / records.len() as f64)
    }

    pub fn average_nucleotide_composition(&self) -> Result<NucleotideComposition> {
        let records = self.non_empty()?;
        let mean = |base: u8| {
            records.iter().map(|rec| rec.base_percentage(base)).sum::<f64>() / records.len() as f64
        };

        Ok(NucleotideComposition {
            a: mean(b'A'),
            t: mean(b'T'),
            g: mean(b'G'),
            c: mean(b'C'),
        })
    }

    pub fn total_cuts_count(&self) -> Result<usize> {
        Ok(self.non_empty()?.iter().map(FastqRecord::cuts_count).sum())
    }

    pub fn cut_records_count(&self) -> Result<usize> {
        Ok(self.non_empty()?.iter().filter(|rec| rec.cuts_count() > 0).count())
    }

    /// `(length, reads)` pairs in ascending length order.
    ///
    /// With `full_range`, every length between the shortest and longest read is present.
    pub fn length_distribution(&self, full_range: bool) -> Result<Vec<(usize, usize)>> {
        let counts = self.length_counts()?;

        if !full_range {
            return Ok(counts.into_iter().collect());
        }

        let (Some(&min), Some(&max)) = (counts.keys().next(), counts.keys().next_back()) else {
            return Err(FastqError::EmptyCollection);
        };
        Ok((min..=max)
            .map(|len| (len, counts.get(&len).copied().unwrap_or(0)))
            .collect())
    }

    /// Reads per rounded GC percentage, for every bucket 1..=100.
    pub fn gc_percent_distribution(&self) -> Result<Vec<(usize, usize)>> {
        let records = self.non_empty()?;

        let mut buckets = [0usize; 101];
        for rec in records {
            let bucket = rec.gc_percent().round_ties_even() as usize;
            if let Some(slot) = buckets.get_mut(bucket) {
                *slot += 1;
            }
        }

        Ok((1..=100).map(|pct| (pct, buckets[pct])).collect())
    }

    /// Base percentages per position, up to the longest read.
    pub fn positional_base_composition(&self) -> Result<Vec<PositionComposition>> {
        let records = self.non_empty()?;
        let max_len = records.iter().map(FastqRecord::len).max().unwrap_or(0);

        let mut counts = vec![[0usize; NUCLEOTIDES.len()]; max_len];
        let mut depth = vec![0usize; max_len];
        for rec in records {
            for (pos, base) in rec.sequence().bytes().enumerate() {
                depth[pos] += 1;
                if let Some(idx) = NUCLEOTIDES.iter().position(|&n| n == base) {
                    counts[pos][idx] += 1;
                }
            }
        }

        Ok(counts
            .iter()
            .zip(&depth)
            .enumerate()
            .map(|(position, (tally, &reads))| {
                let pct = |idx: usize| tally[idx] as f64 / reads as f64 * 100.0;
                PositionComposition {
                    position,
                    a: pct(0),
                    t: pct(1),
                    g: pct(2),
                    c: pct(3),
                    n: pct(4),
                }
            })
            .collect())
    }

    /// Histogram of per-read mean quality at 0.2 resolution, gaps zero-filled.
    pub fn average_quality_per_read_distribution(&self) -> Result<Vec<(f64, usize)>> {
        let records = self.non_empty()?;

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for rec in records {
            let bucket = (rec.mean_quality() * QUALITY_BUCKETS_PER_UNIT).round_ties_even() as i64;
            *counts.entry(bucket).or_insert(0) += 1;
        }

        let (Some(&min), Some(&max)) = (counts.keys().next(), counts.keys().next_back()) else {
            return Err(FastqError::EmptyCollection);
        };
        Ok((min..=max)
            .map(|bucket| {
                (
                    bucket as f64 / QUALITY_BUCKETS_PER_UNIT,
                    counts.get(&bucket).copied().unwrap_or(0),
                )
            })
            .collect())
    }

    /// `(position, mean quality)` over the reads reaching each position.
    pub fn positional_mean_quality(&self) -> Result<Vec<(usize, f64)>> {
        let records = self.non_empty()?;
        let max_len = records.iter().map(FastqRecord::len).max().unwrap_or(0);

        let mut sums = vec![0i64; max_len];
        let mut depth = vec![0usize; max_len];
        for rec in records {
            for (pos, &score) in rec.qualities().iter().enumerate() {
                sums[pos] += i64::from(score);
                depth[pos] += 1;
            }
        }

        Ok(sums
            .iter()
            .zip(&depth)
            .enumerate()
            .map(|(pos, (&sum, &reads))| (pos, sum as f64 / reads as f64))
            .collect())
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary {
            total_reads: self.count()?,
            cut_records: self.cut_records_count()?,
            total_cuts: self.total_cuts_count()?,
            length_mode: self.length_mode()?,
            mean_gc: self.average_gc_percent()?,
            composition: self.average_nucleotide_composition()?,
        })
    }

    pub fn report(&self) -> Result<Report> {
        Ok(Report {
            summary: self.summary()?,
            length_distribution: self.length_distribution(true)?,
            gc_distribution: self.gc_percent_distribution()?,
            position_composition: self.positional_base_composition()?,
            quality_per_read: self.average_quality_per_read_distribution()?,
            position_quality: self.positional_mean_quality()?,
        })
    }

    fn length_counts(&self) -> Result<BTreeMap<usize, usize>> {
        let mut counts = BTreeMap::new();
        for rec in self.non_empty()? {
            *counts.entry(rec.len()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(seqs: &[(&str, i32)]) -> RecordCollection {
        seqs.iter()
            .enumerate()
            .map(|(i, &(seq, q))| {
                FastqRecord::new(format!("@r{}", i), seq, vec![q; seq.len()]).unwrap()
            })
            .collect()
    }

    #[test]
    fn mode_ties_pick_shortest_length() {
        let reads = collection(&[("AAAA", 30), ("AA", 30), ("AAAA", 30), ("AA", 30), ("AAA", 30)]);
        assert_eq!(reads.length_mode().unwrap(), 2);
    }

    #[test]
    fn gc_buckets_round_half_to_even() {
        // 1 of 8 bases is G: 12.5% lands in bucket 12.
        let reads = collection(&[("GAAAAAAA", 30), ("AAAA", 30)]);
        let dist = reads.gc_percent_distribution().unwrap();
        assert_eq!(dist.len(), 100);
        assert_eq!(dist[0], (1, 0));
        assert_eq!(dist[11], (12, 1));
        assert_eq!(dist.iter().map(|&(_, n)| n).sum::<usize>(), 1);
    }

    #[test]
    fn quality_buckets_are_contiguous() {
        let reads = collection(&[("AC", 30), ("AC", 31)]);
        let dist = reads.average_quality_per_read_distribution().unwrap();
        assert_eq!(dist.len(), 6);
        assert_eq!(dist.first(), Some(&(30.0, 1)));
        assert_eq!(dist.last(), Some(&(31.0, 1)));
        assert!(dist[1..5].iter().all(|&(_, n)| n == 0));
    }

    #[test]
    fn shorter_reads_leave_positional_denominators() {
        let reads = collection(&[("AC", 10), ("AGT", 20)]);

        let comp = reads.positional_base_composition().unwrap();
        assert_eq!(comp.len(), 3);
        assert_eq!(comp[0].a, 100.0);
        assert_eq!(comp[1].c, 50.0);
        assert_eq!(comp[1].g, 50.0);
        assert_eq!(comp[2].t, 100.0);

        let quality = reads.positional_mean_quality().unwrap();
        assert_eq!(quality, vec![(0, 15.0), (1, 15.0), (2, 20.0)]);
    }
}
