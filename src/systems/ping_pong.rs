//! Ping-pong buffering for Jacobi loops
//!
//! Two buffers alternate as source and destination. The role flag records
//! which one holds the latest round, so callers no longer depend on the
//! iteration count being even.

use crate::core::dispatch::Dispatcher;
use crate::core::field::Field;
use crate::domain::config::PingPongPolicy;

use super::buffers::copy_field;

/// Which buffer of a pair holds the latest result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The caller-visible buffer (the field being solved).
    Primary,
    /// The scratch/temp buffer.
    Scratch,
}

pub struct PingPong<'a> {
    primary: &'a mut Field,
    scratch: &'a mut Field,
    latest: Role,
    rounds: u32,
}

impl<'a> PingPong<'a> {
    /// Start with the primary buffer as the current state.
    pub fn new(primary: &'a mut Field, scratch: &'a mut Field) -> Self {
        PingPong { primary, scratch, latest: Role::Primary, rounds: 0 }
    }

    pub fn latest(&self) -> Role { self.latest }

    pub fn rounds(&self) -> u32 { self.rounds }

    /// Buffer holding the latest round's output.
    pub fn latest_mut(&mut self) -> &mut Field {
        match self.latest {
            Role::Primary => &mut *self.primary,
            Role::Scratch => &mut *self.scratch,
        }
    }

    /// Run one round: `kernel(read, write)` reads the latest buffer and
    /// writes the other one, then the roles swap.
    pub fn round<F>(&mut self, kernel: F)
    where
        F: FnOnce(&Field, &mut Field),
    {
        match self.latest {
            Role::Primary => {
                kernel(&*self.primary, &mut *self.scratch);
                self.latest = Role::Scratch;
            }
            Role::Scratch => {
                kernel(&*self.scratch, &mut *self.primary);
                self.latest = Role::Primary;
            }
        }
        self.rounds += 1;
    }

    /// End the loop. Under `Normalize` a result left in scratch is copied
    /// into the primary buffer. Returns where the result now lives.
    pub fn finish(self, d: &Dispatcher, policy: PingPongPolicy) -> Role {
        match (self.latest, policy) {
            (Role::Scratch, PingPongPolicy::Normalize) => {
                copy_field(d, &*self.scratch, &mut *self.primary);
                Role::Primary
            }
            (latest, _) => latest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn add_one(src: &Field, dst: &mut Field) {
        for (o, i) in dst.cells_mut().iter_mut().zip(src.cells()) {
            *o = *i + Vec4::ONE;
        }
    }

    #[test]
    fn roles_alternate_each_round() {
        let mut a = Field::zeroed(16).unwrap();
        let mut b = Field::zeroed(16).unwrap();
        let mut pp = PingPong::new(&mut a, &mut b);
        assert_eq!(pp.latest(), Role::Primary);
        pp.round(add_one);
        assert_eq!(pp.latest(), Role::Scratch);
        pp.round(add_one);
        assert_eq!(pp.latest(), Role::Primary);
        assert_eq!(pp.rounds(), 2);
        assert_eq!(pp.latest_mut().at(0, 0), Vec4::splat(2.0));
    }

    #[test]
    fn odd_rounds_normalize_into_primary() {
        let d = Dispatcher::new(16).unwrap();
        let mut a = Field::zeroed(16).unwrap();
        let mut b = Field::zeroed(16).unwrap();
        {
            let mut pp = PingPong::new(&mut a, &mut b);
            for _ in 0..3 {
                pp.round(add_one);
            }
            assert_eq!(pp.finish(&d, PingPongPolicy::Normalize), Role::Primary);
        }
        assert_eq!(a.at(5, 5), Vec4::splat(3.0));
    }

    #[test]
    fn odd_rounds_stay_in_scratch_under_source_parity() {
        let d = Dispatcher::new(16).unwrap();
        let mut a = Field::zeroed(16).unwrap();
        let mut b = Field::zeroed(16).unwrap();
        {
            let mut pp = PingPong::new(&mut a, &mut b);
            for _ in 0..3 {
                pp.round(add_one);
            }
            assert_eq!(pp.finish(&d, PingPongPolicy::SourceParity), Role::Scratch);
        }
        assert_eq!(b.at(5, 5), Vec4::splat(3.0));
        assert_eq!(a.at(5, 5), Vec4::splat(2.0));
    }
}
