//! Random password generation.
//!
//! Each position first draws a character class from a shuffled bag that
//! holds one ticket per enabled class and refills once empty, then picks a
//! character uniformly within that class.  Enabled classes therefore show
//! up in roughly equal numbers whatever their sizes.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use zeroize::Zeroizing;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIALS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Letter,
    Digit,
    Special,
}

impl CharClass {
    fn alphabet(self) -> &'static [u8] {
        match self {
            Self::Letter => LETTERS,
            Self::Digit => DIGITS,
            Self::Special => SPECIALS,
        }
    }
}

/// What a generated password is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub digits: bool,
    pub specials: bool,
}

impl PasswordPolicy {
    fn classes(&self) -> Vec<CharClass> {
        let mut classes = vec![CharClass::Letter];
        if self.digits {
            classes.push(CharClass::Digit);
        }
        if self.specials {
            classes.push(CharClass::Special);
        }
        classes
    }
}

/// Generate a password with the thread-local RNG.
pub fn generate(policy: &PasswordPolicy) -> Zeroizing<String> {
    generate_with(policy, &mut rand::rng())
}

/// Generate a password drawing randomness from `rng`.
pub fn generate_with<R: Rng + ?Sized>(policy: &PasswordPolicy, rng: &mut R) -> Zeroizing<String> {
    let classes = policy.classes();
    let mut bag: Vec<CharClass> = Vec::with_capacity(classes.len());
    let mut password = Zeroizing::new(String::with_capacity(policy.length));

    for _ in 0..policy.length {
        if bag.is_empty() {
            bag.extend_from_slice(&classes);
            bag.shuffle(rng);
        }
        let Some(class) = bag.pop() else { break };
        if let Some(&byte) = class.alphabet().choose(rng) {
            password.push(char::from(byte));
        }
    }

    password
}
