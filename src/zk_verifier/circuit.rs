//! Circuit layout: columns, queries and gate expressions.
//!
//! Gates are polynomial expressions over *query indices*. A query names a
//! column and a rotation; evaluating a gate at `x` reads the column polynomial
//! at `omega^rotation * x`. Fixed columns double as selectors.

use std::collections::BTreeSet;
use std::ops::{Add, Mul, Neg, Sub};

use super::reader::ByteReader;
use crate::constants::{CIRCUIT_INFO_MAGIC, FIELD_BYTES, G1_BYTES};
use crate::error::{Artifact, VerifierError, VerifierResult};
use crate::field::{self, FieldElement};
use crate::validation_limits::VerifierLimits;

const TAG_CONSTANT: u8 = 0;
const TAG_FIXED: u8 = 1;
const TAG_ADVICE: u8 = 2;
const TAG_INSTANCE: u8 = 3;
const TAG_NEGATED: u8 = 4;
const TAG_SUM: u8 = 5;
const TAG_PRODUCT: u8 = 6;
const TAG_SCALED: u8 = 7;

/// Row offset of a query relative to the current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rotation(pub i32);

impl Rotation {
    pub const fn cur() -> Self {
        Rotation(0)
    }

    pub const fn next() -> Self {
        Rotation(1)
    }

    pub const fn prev() -> Self {
        Rotation(-1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub column: usize,
    pub rotation: Rotation,
}

impl Query {
    pub const fn new(column: usize, rotation: Rotation) -> Self {
        Self { column, rotation }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Constant(FieldElement),
    /// Index into `CircuitInfo::fixed_queries`.
    Fixed(usize),
    /// Index into `CircuitInfo::advice_queries`.
    Advice(usize),
    /// Index into `CircuitInfo::instance_queries`.
    Instance(usize),
    Negated(Box<Expression>),
    Sum(Box<Expression>, Box<Expression>),
    Product(Box<Expression>, Box<Expression>),
    Scaled(Box<Expression>, FieldElement),
}

impl Expression {
    /// Folds the expression tree with one closure per node kind.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate<T>(
        &self,
        constant: &impl Fn(FieldElement) -> T,
        fixed: &impl Fn(usize) -> T,
        advice: &impl Fn(usize) -> T,
        instance: &impl Fn(usize) -> T,
        negated: &impl Fn(T) -> T,
        sum: &impl Fn(T, T) -> T,
        product: &impl Fn(T, T) -> T,
        scaled: &impl Fn(T, FieldElement) -> T,
    ) -> T {
        let eval = |e: &Expression| {
            e.evaluate(
                constant, fixed, advice, instance, negated, sum, product, scaled,
            )
        };
        match self {
            Expression::Constant(c) => constant(*c),
            Expression::Fixed(i) => fixed(*i),
            Expression::Advice(i) => advice(*i),
            Expression::Instance(i) => instance(*i),
            Expression::Negated(a) => negated(eval(a)),
            Expression::Sum(a, b) => sum(eval(a), eval(b)),
            Expression::Product(a, b) => product(eval(a), eval(b)),
            Expression::Scaled(a, f) => scaled(eval(a), *f),
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            Expression::Constant(_) => 0,
            Expression::Fixed(_) | Expression::Advice(_) | Expression::Instance(_) => 1,
            Expression::Negated(a) | Expression::Scaled(a, _) => a.degree(),
            Expression::Sum(a, b) => a.degree().max(b.degree()),
            Expression::Product(a, b) => a.degree().saturating_add(b.degree()),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Expression::Constant(c) => {
                out.push(TAG_CONSTANT);
                out.extend_from_slice(&field::to_le_bytes(c));
            }
            Expression::Fixed(i) => encode_index(out, TAG_FIXED, *i),
            Expression::Advice(i) => encode_index(out, TAG_ADVICE, *i),
            Expression::Instance(i) => encode_index(out, TAG_INSTANCE, *i),
            Expression::Negated(a) => {
                out.push(TAG_NEGATED);
                a.encode(out);
            }
            Expression::Sum(a, b) => {
                out.push(TAG_SUM);
                a.encode(out);
                b.encode(out);
            }
            Expression::Product(a, b) => {
                out.push(TAG_PRODUCT);
                a.encode(out);
                b.encode(out);
            }
            Expression::Scaled(a, f) => {
                out.push(TAG_SCALED);
                a.encode(out);
                out.extend_from_slice(&field::to_le_bytes(f));
            }
        }
    }
}

fn encode_index(out: &mut Vec<u8>, tag: u8, index: usize) {
    out.push(tag);
    out.extend_from_slice(&(index as u32).to_le_bytes());
}

impl Neg for Expression {
    type Output = Expression;
    fn neg(self) -> Self::Output {
        Expression::Negated(Box::new(self))
    }
}

impl Add for Expression {
    type Output = Expression;
    fn add(self, rhs: Expression) -> Self::Output {
        Expression::Sum(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Expression {
    type Output = Expression;
    fn sub(self, rhs: Expression) -> Self::Output {
        Expression::Sum(Box::new(self), Box::new(-rhs))
    }
}

impl Mul for Expression {
    type Output = Expression;
    fn mul(self, rhs: Expression) -> Self::Output {
        Expression::Product(Box::new(self), Box::new(rhs))
    }
}

impl Mul<FieldElement> for Expression {
    type Output = Expression;
    fn mul(self, rhs: FieldElement) -> Self::Output {
        Expression::Scaled(Box::new(self), rhs)
    }
}

/// Running totals while decoding gates.
struct ExpressionDecoder<'l> {
    limits: &'l VerifierLimits,
    nodes: usize,
    num_fixed_queries: usize,
    num_advice_queries: usize,
    num_instance_queries: usize,
}

impl ExpressionDecoder<'_> {
    fn decode(&mut self, reader: &mut ByteReader<'_>, depth: usize) -> VerifierResult<Expression> {
        if depth > self.limits.max_expression_depth {
            return Err(reader.malformed("expression nested too deeply"));
        }
        self.nodes += 1;
        if self.nodes > self.limits.max_expression_nodes {
            return Err(reader.malformed("too many expression nodes"));
        }

        let tag = reader.read_u8()?;
        let expr = match tag {
            TAG_CONSTANT => Expression::Constant(reader.read_scalar()?),
            TAG_FIXED => Expression::Fixed(self.index(reader, self.num_fixed_queries)?),
            TAG_ADVICE => Expression::Advice(self.index(reader, self.num_advice_queries)?),
            TAG_INSTANCE => Expression::Instance(self.index(reader, self.num_instance_queries)?),
            TAG_NEGATED => Expression::Negated(Box::new(self.decode(reader, depth + 1)?)),
            TAG_SUM | TAG_PRODUCT => {
                let a = Box::new(self.decode(reader, depth + 1)?);
                let b = Box::new(self.decode(reader, depth + 1)?);
                if tag == TAG_SUM {
                    Expression::Sum(a, b)
                } else {
                    Expression::Product(a, b)
                }
            }
            TAG_SCALED => {
                let a = Box::new(self.decode(reader, depth + 1)?);
                Expression::Scaled(a, reader.read_scalar()?)
            }
            _ => return Err(reader.malformed("unknown expression tag")),
        };
        Ok(expr)
    }

    fn index(&self, reader: &mut ByteReader<'_>, bound: usize) -> VerifierResult<usize> {
        let index = reader.read_u32()? as usize;
        if index >= bound {
            return Err(reader.malformed("query index out of range"));
        }
        Ok(index)
    }
}

/// Metadata needed to rebuild the verifier's arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitInfo {
    /// Implicit circuit-size exponent, if the circuit states one.
    pub k: Option<u32>,
    pub num_advice: usize,
    pub num_fixed: usize,
    pub num_public_inputs: usize,
    pub advice_queries: Vec<Query>,
    pub fixed_queries: Vec<Query>,
    /// Rotations of the single instance column.
    pub instance_queries: Vec<Rotation>,
    pub gates: Vec<Expression>,
}

impl CircuitInfo {
    pub fn from_bytes(bytes: &[u8], limits: &VerifierLimits) -> VerifierResult<Self> {
        let mut reader = ByteReader::new(bytes, Artifact::CircuitInfo);
        reader.expect_magic(&CIRCUIT_INFO_MAGIC)?;

        let k_flag = reader.read_u8()?;
        let k_value = reader.read_u32()?;
        let k = match (k_flag, k_value) {
            (0, 0) => None,
            (0, _) => return Err(reader.malformed("k value present without flag")),
            (1, k) => Some(k),
            _ => return Err(reader.malformed("invalid k flag")),
        };

        let columns = |n| limits.verify_columns_count(n);
        let num_advice = reader.read_count(columns, "too many advice columns")?;
        let num_fixed = reader.read_count(columns, "too many fixed columns")?;
        let num_public_inputs = reader.read_count(
            |n| limits.verify_public_inputs_count(n),
            "too many public inputs",
        )?;

        let advice_queries = read_queries(&mut reader, num_advice, limits)?;
        let fixed_queries = read_queries(&mut reader, num_fixed, limits)?;

        let count = reader.read_count(
            |n| limits.verify_queries_count(n),
            "too many instance queries",
        )?;
        let mut instance_queries = Vec::with_capacity(count);
        for _ in 0..count {
            let rotation = read_rotation(&mut reader, limits)?;
            if instance_queries.contains(&rotation) {
                return Err(reader.malformed("duplicate instance query"));
            }
            instance_queries.push(rotation);
        }

        let num_gates =
            reader.read_count(|n| limits.verify_gates_count(n), "gate count out of range")?;
        let mut decoder = ExpressionDecoder {
            limits,
            nodes: 0,
            num_fixed_queries: fixed_queries.len(),
            num_advice_queries: advice_queries.len(),
            num_instance_queries: instance_queries.len(),
        };
        let mut gates = Vec::with_capacity(num_gates);
        for _ in 0..num_gates {
            let gate = decoder.decode(&mut reader, 0)?;
            if !limits.verify_degree(gate.degree()) {
                return Err(reader.malformed("gate degree too high"));
            }
            gates.push(gate);
        }
        reader.finish()?;

        Ok(Self {
            k,
            num_advice,
            num_fixed,
            num_public_inputs,
            advice_queries,
            fixed_queries,
            instance_queries,
            gates,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&CIRCUIT_INFO_MAGIC);
        match self.k {
            Some(k) => {
                out.push(1);
                out.extend_from_slice(&k.to_le_bytes());
            }
            None => {
                out.push(0);
                out.extend_from_slice(&0u32.to_le_bytes());
            }
        }
        for count in [self.num_advice, self.num_fixed, self.num_public_inputs] {
            out.extend_from_slice(&(count as u32).to_le_bytes());
        }
        for queries in [&self.advice_queries, &self.fixed_queries] {
            out.extend_from_slice(&(queries.len() as u32).to_le_bytes());
            for q in queries.iter() {
                out.extend_from_slice(&(q.column as u32).to_le_bytes());
                out.extend_from_slice(&q.rotation.0.to_le_bytes());
            }
        }
        out.extend_from_slice(&(self.instance_queries.len() as u32).to_le_bytes());
        for rotation in &self.instance_queries {
            out.extend_from_slice(&rotation.0.to_le_bytes());
        }
        out.extend_from_slice(&(self.gates.len() as u32).to_le_bytes());
        for gate in &self.gates {
            gate.encode(&mut out);
        }
        out
    }

    /// Resolves the circuit-size exponent from the caller's optional value and
    /// the circuit's own bookkeeping.
    pub fn resolve_k(&self, requested: Option<u32>) -> VerifierResult<u32> {
        match (requested, self.k) {
            (Some(k), Some(implicit)) if k != implicit => Err(VerifierError::SizeMismatch(
                "explicit k disagrees with circuit info",
            )),
            (Some(k), _) => Ok(k),
            (None, Some(implicit)) => Ok(implicit),
            (None, None) => Err(VerifierError::SizeMismatch(
                "k not supplied and circuit info has no implicit size",
            )),
        }
    }

    pub fn max_degree(&self) -> usize {
        self.gates.iter().map(Expression::degree).max().unwrap_or(0)
    }

    /// The quotient `h` has degree below `(d - 1) n` and is committed in
    /// `d - 1` pieces of `n` coefficients each.
    pub fn quotient_pieces(&self) -> usize {
        self.max_degree().max(2) - 1
    }

    /// Distinct rotations at which commitments are opened, ascending; always
    /// includes the current row because the quotient is opened there.
    pub fn opening_rotations(&self) -> Vec<Rotation> {
        let mut rotations: BTreeSet<Rotation> = self
            .advice_queries
            .iter()
            .chain(self.fixed_queries.iter())
            .map(|q| q.rotation)
            .collect();
        rotations.insert(Rotation::cur());
        rotations.into_iter().collect()
    }

    /// Exact byte length of a proof for this circuit.
    pub fn proof_len(&self) -> Option<usize> {
        let pieces = self.quotient_pieces();
        let points = self
            .num_advice
            .checked_add(pieces)?
            .checked_add(self.opening_rotations().len())?;
        let scalars = self
            .advice_queries
            .len()
            .checked_add(self.fixed_queries.len())?
            .checked_add(pieces)?;
        points
            .checked_mul(G1_BYTES)?
            .checked_add(scalars.checked_mul(FIELD_BYTES)?)
    }
}

fn read_rotation(reader: &mut ByteReader<'_>, limits: &VerifierLimits) -> VerifierResult<Rotation> {
    let rotation = reader.read_i32()?;
    if !limits.verify_rotation(rotation) {
        return Err(reader.malformed("rotation out of range"));
    }
    Ok(Rotation(rotation))
}

fn read_queries(
    reader: &mut ByteReader<'_>,
    num_columns: usize,
    limits: &VerifierLimits,
) -> VerifierResult<Vec<Query>> {
    let count = reader.read_count(|n| limits.verify_queries_count(n), "too many queries")?;
    let mut queries = Vec::with_capacity(count);
    for _ in 0..count {
        let column = reader.read_u32()? as usize;
        if column >= num_columns {
            return Err(reader.malformed("query column out of range"));
        }
        let query = Query::new(column, read_rotation(reader, limits)?);
        if queries.contains(&query) {
            return Err(reader.malformed("duplicate query"));
        }
        queries.push(query);
    }
    Ok(queries)
}
