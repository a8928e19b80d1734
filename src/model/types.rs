use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

macro_rules! periodic_table {
    ($($symbol:ident = $number:literal),+ $(,)?) => {
        /// Chemical element, discriminant equal to its atomic number.
        ///
        /// The derived ordering follows the atomic number, which is what the
        /// type vocabulary relies on for its ascending `atom_types` table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($symbol = $number,)+
        }

        impl Element {
            const ALL: &'static [Element] = &[$(Element::$symbol,)+];

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$symbol => stringify!($symbol),)+
                }
            }
        }
    };
}

periodic_table! {
    H = 1, He = 2, Li = 3, Be = 4,
    B = 5, C = 6, N = 7, O = 8,
    F = 9, Ne = 10, Na = 11, Mg = 12,
    Al = 13, Si = 14, P = 15, S = 16,
    Cl = 17, Ar = 18, K = 19, Ca = 20,
    Sc = 21, Ti = 22, V = 23, Cr = 24,
    Mn = 25, Fe = 26, Co = 27, Ni = 28,
    Cu = 29, Zn = 30, Ga = 31, Ge = 32,
    As = 33, Se = 34, Br = 35, Kr = 36,
    Rb = 37, Sr = 38, Y = 39, Zr = 40,
    Nb = 41, Mo = 42, Tc = 43, Ru = 44,
    Rh = 45, Pd = 46, Ag = 47, Cd = 48,
    In = 49, Sn = 50, Sb = 51, Te = 52,
    I = 53, Xe = 54, Cs = 55, Ba = 56,
    La = 57, Ce = 58, Pr = 59, Nd = 60,
    Pm = 61, Sm = 62, Eu = 63, Gd = 64,
    Tb = 65, Dy = 66, Ho = 67, Er = 68,
    Tm = 69, Yb = 70, Lu = 71, Hf = 72,
    Ta = 73, W = 74, Re = 75, Os = 76,
    Ir = 77, Pt = 78, Au = 79, Hg = 80,
    Tl = 81, Pb = 82, Bi = 83, Po = 84,
    At = 85, Rn = 86, Fr = 87, Ra = 88,
    Ac = 89, Th = 90, Pa = 91, U = 92,
    Np = 93, Pu = 94, Am = 95, Cm = 96,
    Bk = 97, Cf = 98, Es = 99, Fm = 100,
    Md = 101, No = 102, Lr = 103, Rf = 104,
    Db = 105, Sg = 106, Bh = 107, Hs = 108,
    Mt = 109, Ds = 110, Rg = 111, Cn = 112,
    Nh = 113, Fl = 114, Mc = 115, Lv = 116,
    Ts = 117, Og = 118,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_atomic_number(number: u8) -> Option<Self> {
        let idx = usize::from(number).checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// Normal valence states used to derive implicit hydrogen counts for
    /// atoms written without brackets. Empty for elements outside the SMILES
    /// organic subset.
    pub fn default_valences(&self) -> &'static [u8] {
        match self {
            Element::B => &[3],
            Element::C => &[4],
            Element::N => &[3, 5],
            Element::O => &[2],
            Element::P => &[3, 5],
            Element::S => &[2, 4, 6],
            Element::F | Element::Cl | Element::Br | Element::I => &[1],
            _ => &[],
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

/// Bond category.
///
/// Variant order is the fixed convention used for the `bond_types`
/// vocabulary: Single < Double < Triple < Aromatic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Valence units consumed on each endpoint. Aromatic bonds count as one;
    /// the extra pi unit is accounted for on the atom.
    pub fn valence(&self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BondOrder::Single => "single",
            BondOrder::Double => "double",
            BondOrder::Triple => "triple",
            BondOrder::Aromatic => "aromatic",
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}
