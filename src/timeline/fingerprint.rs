use crate::timeline::frame::{ResolvedCue, ResolvedFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// 128-bit digest of one resolved frame state.
///
/// Two frames with equal fingerprints carry the same visual state; batch
/// callers use this to verify determinism across runs and machines without
/// keeping full snapshots around.
pub struct FrameFingerprint {
    /// High hash lane.
    pub hi: u64,
    /// Low hash lane.
    pub lo: u64,
}

/// Digest a resolved frame into a [`FrameFingerprint`].
///
/// Floats are hashed by bit pattern, so the digest is exact: any progress
/// difference, however small, changes the fingerprint.
pub fn fingerprint_frame(state: &ResolvedFrame) -> FrameFingerprint {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u64_pair(&mut a, &mut b, state.frame.0);
    write_u64_pair(&mut a, &mut b, state.cues.len() as u64);
    for cue in &state.cues {
        write_cue_pair(&mut a, &mut b, cue);
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_cue_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, cue: &ResolvedCue) {
    write_u64_pair(a, b, cue.index as u64);
    write_opt_str_pair(a, b, cue.action.as_deref());
    write_opt_str_pair(a, b, cue.target.as_deref());
    write_u64_pair(a, b, cue.progress.to_bits());
}

fn write_opt_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: Option<&str>) {
    match s {
        Some(s) => {
            write_u8_pair(a, b, 1);
            write_str_pair(a, b, s);
        }
        None => write_u8_pair(a, b, 0),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/fingerprint.rs"]
mod tests;
