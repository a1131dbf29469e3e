use crate::core::models::atom::{Atom, AtomIndex};
use crate::core::models::error::ModelError;
use crate::core::models::molecule::Molecule;
use crate::core::models::reaction::Reaction;
use crate::core::models::topology::{BondOrder, bond_key};
use crate::core::utils::elements;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Write;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmilesError {
    #[error("SMILES input is empty")]
    EmptyInput,
    #[error("Reaction SMILES must contain exactly one '>>' separator")]
    MissingSeparator,
    #[error("Reaction SMILES with a reagent section ('a>b>c') is not supported")]
    ReagentSection,
    #[error("The {0} side of the reaction is empty")]
    EmptySide(&'static str),
    #[error("Expected exactly one molecule, found {0}")]
    ComponentCount(usize),
    #[error("Syntax error at position {position}: {kind}")]
    Syntax {
        position: usize,
        kind: SyntaxErrorKind,
    },
    #[error("No atom index is left for unmapped atoms above map number {0}")]
    IndexOverflow(AtomIndex),
    #[error("Invalid structure: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("bracket atom is never closed")]
    UnclosedBracket,
    #[error("ring closure {0} is never closed")]
    UnclosedRing(u16),
    #[error("ring closure {0} is opened and closed with different bond orders")]
    RingBondConflict(u16),
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    #[error("bond is not followed by an atom")]
    DanglingBond,
    #[error("number is out of range")]
    NumberOutOfRange,
    #[error("empty molecule")]
    EmptyComponent,
}

/// Parses a mapped reaction SMILES such as `[CH3:1][OH:2]>>[CH2:1]=[O:2]`.
///
/// Only the first whitespace-separated token is read, so trailing names or
/// extension blocks are ignored. Error positions count characters from the
/// start of that token.
///
/// # Errors
///
/// Returns [`SmilesError`] for malformed text, for a missing or repeated
/// `>>`, for an empty side, and for structures the model rejects (such as a
/// map number used twice on one side).
pub fn parse_reaction(smiles: &str) -> Result<Reaction, SmilesError> {
    let token = smiles
        .split_whitespace()
        .next()
        .ok_or(SmilesError::EmptyInput)?;
    let (reactant_text, product_text) = split_sides(token)?;

    let reactants = Parser::new(reactant_text, 0).parse()?;
    let products = Parser::new(product_text, reactant_text.chars().count() + 2).parse()?;
    if reactants.is_empty() {
        return Err(SmilesError::EmptySide("reactant"));
    }
    if products.is_empty() {
        return Err(SmilesError::EmptySide("product"));
    }

    let mut next_index = largest_map(reactants.iter().chain(&products));
    let reactants = build_side(reactants, &mut next_index)?;
    let products = build_side(products, &mut next_index)?;
    Ok(Reaction::new(reactants, products)?)
}

/// Parses a single-component SMILES into one molecule.
///
/// # Errors
///
/// Fails like [`parse_reaction`], and with [`SmilesError::ComponentCount`]
/// when the text holds more than one `.`-separated component.
pub fn parse_molecule(smiles: &str) -> Result<Molecule, SmilesError> {
    let token = smiles
        .split_whitespace()
        .next()
        .ok_or(SmilesError::EmptyInput)?;
    let mut components = Parser::new(token, 0).parse()?;
    if components.len() != 1 {
        return Err(SmilesError::ComponentCount(components.len()));
    }
    let mut next_index = largest_map(components.iter());
    match components.pop() {
        Some(raw) => build_molecule(raw, &mut next_index),
        None => Err(SmilesError::EmptyInput),
    }
}

/// Writes a reaction as mapped SMILES, every atom in bracket form.
pub fn write_reaction(reaction: &Reaction) -> String {
    format!(
        "{}>>{}",
        write_side(reaction.reactants()),
        write_side(reaction.products())
    )
}

/// Writes a molecule as mapped SMILES. Disconnected fragments are joined
/// with `.`.
pub fn write_molecule(mol: &Molecule) -> String {
    MoleculeWriter::new(mol).write()
}

fn split_sides(token: &str) -> Result<(&str, &str), SmilesError> {
    let parts: Vec<&str> = token.split('>').collect();
    match parts.as_slice() {
        [reactants, "", products] => Ok((*reactants, *products)),
        [_, _, _] => Err(SmilesError::ReagentSection),
        _ => Err(SmilesError::MissingSeparator),
    }
}

fn write_side(side: &[Molecule]) -> String {
    side.iter()
        .map(write_molecule)
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Debug)]
struct RawAtom {
    atom: Atom,
    map: Option<AtomIndex>,
    /// Bracket atoms state their hydrogens; organic-subset atoms get implicit ones.
    bracket: bool,
}

#[derive(Debug)]
struct RingOpening {
    atom: usize,
    order: Option<BondOrder>,
    position: usize,
}

/// One `.`-separated component while it is being read.
#[derive(Debug, Default)]
struct RawComponent {
    atoms: Vec<RawAtom>,
    /// `None` marks a bond written without a symbol.
    bonds: Vec<(usize, usize, Option<BondOrder>)>,
    prev: Option<usize>,
    branches: Vec<(usize, usize)>,
    pending: Option<(BondOrder, usize)>,
    rings: BTreeMap<u16, RingOpening>,
}

impl RawComponent {
    fn attach(&mut self, atom: RawAtom) {
        let slot = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = self.pending.take().map(|(order, _)| order);
            self.bonds.push((prev, slot, order));
        }
        self.prev = Some(slot);
    }

    fn order_of(&self, order: Option<BondOrder>, a: usize, b: usize) -> BondOrder {
        order.unwrap_or_else(|| {
            if self.atoms[a].atom.is_aromatic && self.atoms[b].atom.is_aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        })
    }

    fn map_numbers(&self) -> impl Iterator<Item = AtomIndex> + '_ {
        self.atoms.iter().filter_map(|raw| raw.map)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    offset: usize,
}

impl Parser {
    fn new(text: &str, offset: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            offset,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, position: usize, kind: SyntaxErrorKind) -> SmilesError {
        SmilesError::Syntax {
            position: self.offset + position,
            kind,
        }
    }

    fn unexpected(&self, position: usize) -> SmilesError {
        let ch = self.chars.get(position).copied().unwrap_or(' ');
        self.error(position, SyntaxErrorKind::UnexpectedChar(ch))
    }

    fn parse(mut self) -> Result<Vec<RawComponent>, SmilesError> {
        let mut components = Vec::new();
        if self.chars.is_empty() {
            return Ok(components);
        }
        let mut current = RawComponent::default();

        while let Some(c) = self.peek() {
            let start = self.pos;
            match c {
                '(' => {
                    let anchor = current
                        .prev
                        .filter(|_| current.pending.is_none())
                        .ok_or_else(|| self.unexpected(start))?;
                    current.branches.push((anchor, start));
                    self.pos += 1;
                }
                ')' => {
                    if let Some((_, at)) = current.pending {
                        return Err(self.error(at, SyntaxErrorKind::DanglingBond));
                    }
                    let (anchor, _) = current
                        .branches
                        .pop()
                        .ok_or_else(|| self.error(start, SyntaxErrorKind::UnbalancedParen))?;
                    current.prev = Some(anchor);
                    self.pos += 1;
                }
                '-' | '=' | '#' | ':' | '/' | '\\' => {
                    if current.prev.is_none() || current.pending.is_some() {
                        return Err(self.unexpected(start));
                    }
                    let order = match c {
                        '=' => BondOrder::Double,
                        '#' => BondOrder::Triple,
                        ':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    current.pending = Some((order, start));
                    self.pos += 1;
                }
                '0'..='9' | '%' => {
                    let anchor = current.prev.ok_or_else(|| self.unexpected(start))?;
                    let label = self.ring_label()?;
                    let order = current.pending.take().map(|(order, _)| order);
                    match current.rings.remove(&label) {
                        Some(opening) => {
                            let order = match (opening.order, order) {
                                (Some(a), Some(b)) if a != b => {
                                    return Err(
                                        self.error(start, SyntaxErrorKind::RingBondConflict(label))
                                    );
                                }
                                (a, b) => a.or(b),
                            };
                            current.bonds.push((opening.atom, anchor, order));
                        }
                        None => {
                            current.rings.insert(
                                label,
                                RingOpening {
                                    atom: anchor,
                                    order,
                                    position: start,
                                },
                            );
                        }
                    }
                }
                '.' => {
                    let finished = std::mem::take(&mut current);
                    components.push(self.finish(finished, start)?);
                    self.pos += 1;
                }
                '[' => {
                    let atom = self.bracket_atom()?;
                    current.attach(atom);
                }
                '*' | 'A'..='Z' | 'a'..='z' => {
                    let atom = self.organic_atom()?;
                    current.attach(atom);
                }
                _ => return Err(self.unexpected(start)),
            }
        }

        let end = self.pos;
        components.push(self.finish(current, end)?);
        Ok(components)
    }

    /// Checks that a component is complete and fills in implicit hydrogens.
    fn finish(&self, mut raw: RawComponent, end: usize) -> Result<RawComponent, SmilesError> {
        if let Some((_, at)) = raw.pending {
            return Err(self.error(at, SyntaxErrorKind::DanglingBond));
        }
        if let Some(&(_, at)) = raw.branches.last() {
            return Err(self.error(at, SyntaxErrorKind::UnbalancedParen));
        }
        if let Some((&label, opening)) = raw.rings.iter().next() {
            return Err(self.error(opening.position, SyntaxErrorKind::UnclosedRing(label)));
        }
        if raw.atoms.is_empty() {
            return Err(self.error(end, SyntaxErrorKind::EmptyComponent));
        }

        let mut valence = vec![0u8; raw.atoms.len()];
        for &(a, b, order) in &raw.bonds {
            let order = raw.order_of(order, a, b);
            valence[a] = valence[a].saturating_add(order.valence());
            valence[b] = valence[b].saturating_add(order.valence());
        }
        for (slot, raw_atom) in raw.atoms.iter_mut().enumerate() {
            if raw_atom.bracket {
                continue;
            }
            let atom = &mut raw_atom.atom;
            let explicit = valence[slot].saturating_add(u8::from(atom.is_aromatic));
            atom.hydrogens = elements::implicit_hydrogens(atom.atomic_num, explicit);
        }
        Ok(raw)
    }

    fn ring_label(&mut self) -> Result<u16, SmilesError> {
        let start = self.pos;
        if self.peek() == Some('%') {
            self.pos += 1;
            if self.peek() == Some('(') {
                self.pos += 1;
                let label = self
                    .number()?
                    .ok_or_else(|| self.unexpected(self.pos.min(self.chars.len())))?;
                if self.peek() != Some(')') {
                    return Err(self.unexpected(self.pos.min(self.chars.len())));
                }
                self.pos += 1;
                return self.narrow(label, start);
            }
            let digits: String = self.chars[self.pos..]
                .iter()
                .take(2)
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.len() != 2 {
                return Err(self.unexpected(self.pos.min(self.chars.len())));
            }
            self.pos += 2;
            return digits
                .parse()
                .map_err(|_| self.error(start, SyntaxErrorKind::NumberOutOfRange));
        }
        let digit = self
            .peek()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| self.unexpected(start))?;
        self.pos += 1;
        Ok(digit as u16)
    }

    /// Reads an unsigned decimal number, or `None` if no digit follows.
    fn number(&mut self) -> Result<Option<u32>, SmilesError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse()
            .map(Some)
            .map_err(|_| self.error(start, SyntaxErrorKind::NumberOutOfRange))
    }

    fn narrow<T: TryFrom<u32>>(&self, value: u32, position: usize) -> Result<T, SmilesError> {
        T::try_from(value).map_err(|_| self.error(position, SyntaxErrorKind::NumberOutOfRange))
    }

    fn organic_atom(&mut self) -> Result<RawAtom, SmilesError> {
        let start = self.pos;
        let first = self.chars[start];
        if first == '*' {
            self.pos += 1;
            return Ok(RawAtom {
                atom: Atom::new(0),
                map: None,
                bracket: false,
            });
        }

        let pair: String = self.chars[start..].iter().take(2).collect();
        let symbol = if pair == "Cl" || pair == "Br" {
            pair
        } else {
            first.to_string()
        };
        let is_aromatic = first.is_ascii_lowercase();
        let element = if is_aromatic {
            symbol.to_ascii_uppercase()
        } else {
            symbol.clone()
        };
        let atomic_num = elements::atomic_number(&element)
            .filter(|&z| elements::is_organic_subset(&element) && (!is_aromatic || elements::can_be_aromatic(z)))
            .ok_or_else(|| self.error(start, SyntaxErrorKind::UnknownElement(symbol.clone())))?;

        self.pos += symbol.len();
        let mut atom = Atom::new(atomic_num);
        atom.is_aromatic = is_aromatic;
        Ok(RawAtom {
            atom,
            map: None,
            bracket: false,
        })
    }

    fn bracket_atom(&mut self) -> Result<RawAtom, SmilesError> {
        let open = self.pos;
        self.pos += 1;

        let isotope_at = self.pos;
        let isotope = match self.number()? {
            Some(value) => self.narrow::<u16>(value, isotope_at)?,
            None => 0,
        };

        let (atomic_num, is_aromatic) = self.bracket_element(open)?;

        while self.peek() == Some('@') {
            self.pos += 1;
        }

        let mut hydrogens = 0u8;
        if self.peek() == Some('H') {
            self.pos += 1;
            let count_at = self.pos;
            hydrogens = match self.number()? {
                Some(value) => self.narrow(value, count_at)?,
                None => 1,
            };
        }

        let mut charge = 0i8;
        if let Some(sign @ ('+' | '-')) = self.peek() {
            let charge_at = self.pos;
            self.pos += 1;
            let magnitude = match self.number()? {
                Some(value) => value,
                None => {
                    let mut repeats = 1;
                    while self.peek() == Some(sign) {
                        repeats += 1;
                        self.pos += 1;
                    }
                    repeats
                }
            };
            let magnitude: i8 = self.narrow(magnitude, charge_at)?;
            charge = if sign == '-' { -magnitude } else { magnitude };
        }

        let mut map = None;
        if self.peek() == Some(':') {
            self.pos += 1;
            let map_at = self.pos;
            let value = self.number()?.ok_or_else(|| self.unexpected(map_at))?;
            map = Some(value).filter(|&value| value != 0);
        }

        match self.peek() {
            Some(']') => self.pos += 1,
            Some(_) => return Err(self.unexpected(self.pos)),
            None => return Err(self.error(open, SyntaxErrorKind::UnclosedBracket)),
        }

        Ok(RawAtom {
            atom: Atom {
                atomic_num,
                charge,
                isotope,
                hydrogens,
                is_aromatic,
            },
            map,
            bracket: true,
        })
    }

    fn bracket_element(&mut self, open: usize) -> Result<(u8, bool), SmilesError> {
        let start = self.pos;
        let first = self
            .peek()
            .ok_or_else(|| self.error(open, SyntaxErrorKind::UnclosedBracket))?;
        if first == '*' {
            self.pos += 1;
            return Ok((0, false));
        }
        if !first.is_ascii_alphabetic() {
            return Err(self.unexpected(start));
        }

        let second = self.chars.get(start + 1).copied();
        if first.is_ascii_uppercase() {
            if let Some(second) = second.filter(char::is_ascii_lowercase) {
                let pair = format!("{first}{second}");
                if let Some(z) = elements::atomic_number(&pair) {
                    self.pos += 2;
                    return Ok((z, false));
                }
            }
            let z = elements::atomic_number(&first.to_string()).ok_or_else(|| {
                self.error(start, SyntaxErrorKind::UnknownElement(first.to_string()))
            })?;
            self.pos += 1;
            return Ok((z, false));
        }

        if let Some(second) = second {
            let pair = format!("{first}{second}");
            if pair == "se" || pair == "as" {
                let z = elements::atomic_number(&format!("{}{second}", first.to_ascii_uppercase()))
                    .ok_or_else(|| self.error(start, SyntaxErrorKind::UnknownElement(pair.clone())))?;
                self.pos += 2;
                return Ok((z, true));
            }
        }
        let z = elements::atomic_number(&first.to_ascii_uppercase().to_string())
            .filter(|&z| elements::can_be_aromatic(z))
            .ok_or_else(|| self.error(start, SyntaxErrorKind::UnknownElement(first.to_string())))?;
        self.pos += 1;
        Ok((z, true))
    }
}

fn largest_map<'a>(components: impl Iterator<Item = &'a RawComponent>) -> AtomIndex {
    components
        .flat_map(RawComponent::map_numbers)
        .max()
        .unwrap_or(0)
}

fn build_side(
    components: Vec<RawComponent>,
    next_index: &mut AtomIndex,
) -> Result<Vec<Molecule>, SmilesError> {
    components
        .into_iter()
        .map(|raw| build_molecule(raw, next_index))
        .collect()
}

/// Turns a finished component into a molecule, numbering unmapped atoms
/// from `next_index` upwards.
fn build_molecule(raw: RawComponent, next_index: &mut AtomIndex) -> Result<Molecule, SmilesError> {
    let indices: Vec<AtomIndex> = raw
        .atoms
        .iter()
        .map(|atom| match atom.map {
            Some(index) => Ok(index),
            None => {
                *next_index = next_index
                    .checked_add(1)
                    .ok_or(SmilesError::IndexOverflow(*next_index))?;
                Ok(*next_index)
            }
        })
        .collect::<Result<_, SmilesError>>()?;

    let mut mol = Molecule::new();
    for (raw_atom, &index) in raw.atoms.iter().zip(&indices) {
        mol.add_atom(index, raw_atom.atom)?;
    }
    for &(a, b, order) in &raw.bonds {
        mol.add_bond(indices[a], indices[b], raw.order_of(order, a, b))?;
    }
    Ok(mol)
}

/// Depth-first writer: a first pass fixes the spanning tree and ring
/// closures, a second pass emits text.
struct MoleculeWriter<'a> {
    mol: &'a Molecule,
    visited: HashSet<AtomIndex>,
    seen_bonds: HashSet<(AtomIndex, AtomIndex)>,
    children: HashMap<AtomIndex, Vec<AtomIndex>>,
    /// Ring bonds keyed by the atom written first.
    ring_opens: HashMap<AtomIndex, Vec<AtomIndex>>,
    /// Ring bonds keyed by the atom written last.
    ring_closes: HashMap<AtomIndex, Vec<AtomIndex>>,
    open_labels: HashMap<(AtomIndex, AtomIndex), u16>,
    labels_in_use: BTreeSet<u16>,
    out: String,
}

impl<'a> MoleculeWriter<'a> {
    fn new(mol: &'a Molecule) -> Self {
        Self {
            mol,
            visited: HashSet::new(),
            seen_bonds: HashSet::new(),
            children: HashMap::new(),
            ring_opens: HashMap::new(),
            ring_closes: HashMap::new(),
            open_labels: HashMap::new(),
            labels_in_use: BTreeSet::new(),
            out: String::new(),
        }
    }

    fn write(mut self) -> String {
        let mut roots = Vec::new();
        for index in self.mol.indices() {
            if !self.visited.contains(&index) {
                roots.push(index);
                self.explore(index);
            }
        }
        for (i, root) in roots.into_iter().enumerate() {
            if i > 0 {
                self.out.push('.');
            }
            self.emit(root);
        }
        self.out
    }

    fn explore(&mut self, atom: AtomIndex) {
        self.visited.insert(atom);
        let neighbors: Vec<AtomIndex> = self.mol.neighbors(atom).map(|(n, _)| n).collect();
        for neighbor in neighbors {
            if !self.seen_bonds.insert(bond_key(atom, neighbor)) {
                continue;
            }
            if self.visited.contains(&neighbor) {
                self.ring_opens.entry(neighbor).or_default().push(atom);
                self.ring_closes.entry(atom).or_default().push(neighbor);
            } else {
                self.children.entry(atom).or_default().push(neighbor);
                self.explore(neighbor);
            }
        }
    }

    fn emit(&mut self, atom: AtomIndex) {
        if let Some(data) = self.mol.atom(atom) {
            write_atom(&mut self.out, atom, data);
        }

        for opener in self.ring_closes.remove(&atom).unwrap_or_default() {
            if let Some(label) = self.open_labels.remove(&bond_key(opener, atom)) {
                let symbol = self.bond_symbol(opener, atom);
                self.out.push_str(symbol);
                push_ring_label(&mut self.out, label);
                self.labels_in_use.remove(&label);
            }
        }
        for closer in self.ring_opens.remove(&atom).unwrap_or_default() {
            let mut label = 1;
            while self.labels_in_use.contains(&label) {
                label += 1;
            }
            self.labels_in_use.insert(label);
            self.open_labels.insert(bond_key(atom, closer), label);
            push_ring_label(&mut self.out, label);
        }

        let children = self.children.remove(&atom).unwrap_or_default();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.into_iter().enumerate() {
            let branch = i < last;
            if branch {
                self.out.push('(');
            }
            let symbol = self.bond_symbol(atom, child);
            self.out.push_str(symbol);
            self.emit(child);
            if branch {
                self.out.push(')');
            }
        }
    }

    fn bond_symbol(&self, a: AtomIndex, b: AtomIndex) -> &'static str {
        let aromatic_pair = [a, b]
            .iter()
            .all(|&index| self.mol.atom(index).is_some_and(|atom| atom.is_aromatic));
        match self.mol.bond_between(a, b).unwrap_or_default() {
            BondOrder::Single if aromatic_pair => "-",
            BondOrder::Single => "",
            BondOrder::Aromatic if aromatic_pair => "",
            BondOrder::Aromatic => ":",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
        }
    }
}

fn push_ring_label(out: &mut String, label: u16) {
    match label {
        0..=9 => {
            let _ = write!(out, "{label}");
        }
        10..=99 => {
            let _ = write!(out, "%{label}");
        }
        _ => {
            let _ = write!(out, "%({label})");
        }
    }
}

fn write_atom(out: &mut String, index: AtomIndex, atom: &Atom) {
    out.push('[');
    if atom.isotope != 0 {
        let _ = write!(out, "{}", atom.isotope);
    }
    if atom.is_aromatic {
        out.push_str(&atom.symbol().to_lowercase());
    } else {
        out.push_str(atom.symbol());
    }
    match atom.hydrogens {
        0 => {}
        1 => out.push('H'),
        n => {
            let _ = write!(out, "H{n}");
        }
    }
    match atom.charge {
        0 => {}
        1 => out.push('+'),
        -1 => out.push('-'),
        charge => {
            let _ = write!(out, "{charge:+}");
        }
    }
    let _ = write!(out, ":{index}]");
}
