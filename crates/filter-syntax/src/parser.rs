//! Decoder for the serialized filter string sent by the query engine.
//!
//! The string is a postfix program over five opcodes:
//!
//! - `a<idx>` pushes a column reference
//! - `c<oid>s<len>d<bytes>` pushes a typed scalar constant
//! - `m<oid>(s<len>d<bytes>)+` pushes a typed list of constants
//! - `o<code>` reduces operands with a comparison operator
//! - `l<code>` reduces built expressions with `AND`, `OR` or `NOT`
//!
//! For example `a1c23s1d5o2` is `_1_ > 5`, and `a1c23s1d5o2a2o8l0` is
//! `(_1_ > 5 AND _2_ IS NULL)`.

use crate::{
    builder::{FilterBuilder, NodeBuilder},
    error::{BuildError, FilterSyntaxError},
};
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::{
        node::{CollectionOperand, ColumnIndexOperand, Node, OperandNode, ScalarOperand},
        operator::Operator,
    },
};
use tracing::trace;

pub type ParseResult<T> = Result<T, FilterSyntaxError>;

/// Parses a filter string into an expression tree without column metadata.
pub fn parse(filter: &str) -> ParseResult<Node> {
    FilterParser::new().parse(filter, &NodeBuilder)
}

enum StackItem<T> {
    Operand(OperandNode),
    Expression(T),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FilterParser<'c> {
    columns: &'c [ColumnDescriptor],
}

impl<'c> FilterParser<'c> {
    pub fn new() -> Self {
        Self { columns: &[] }
    }

    /// Column references resolve their declared data type from `columns`.
    pub fn with_columns(columns: &'c [ColumnDescriptor]) -> Self {
        Self { columns }
    }

    pub fn parse<B: FilterBuilder>(&self, filter: &str, builder: &B) -> ParseResult<B::Output> {
        let mut scanner = Scanner::new(filter);
        let mut stack: Vec<StackItem<B::Output>> = Vec::new();

        while let Some(opcode) = scanner.next_byte() {
            match opcode {
                b'a' => {
                    let column = self.column_operand(&mut scanner)?;
                    stack.push(StackItem::Operand(OperandNode::ColumnIndex(column)));
                }
                b'c' => {
                    let scalar = scanner.scalar_operand()?;
                    stack.push(StackItem::Operand(OperandNode::Scalar(scalar)));
                }
                b'm' => {
                    let collection = scanner.collection_operand()?;
                    stack.push(StackItem::Operand(OperandNode::Collection(collection)));
                }
                b'o' => {
                    let output = reduce_comparison(&mut scanner, &mut stack, builder)?;
                    stack.push(StackItem::Expression(output));
                }
                b'l' => {
                    let output = reduce_logical(&mut scanner, &mut stack, builder)?;
                    stack.push(StackItem::Expression(output));
                }
                other => {
                    return Err(scanner.error(format!(
                        "unknown opcode {}({}) at {}",
                        other as char,
                        other,
                        scanner.pos - 1
                    )));
                }
            }
        }

        let result = match stack.len() {
            0 => return Err(scanner.error("filter parsing ended with no result")),
            1 => stack.pop(),
            _ => return Err(scanner.error("Stack not empty, missing operators?")),
        };

        match result {
            Some(StackItem::Expression(output)) => {
                trace!(filter, "Parsed filter string");
                Ok(output)
            }
            _ => Err(scanner.error("filter parsing failed, missing operators?")),
        }
    }

    fn column_operand(&self, scanner: &mut Scanner<'_>) -> ParseResult<ColumnIndexOperand> {
        let raw = scanner.parse_int32()?;
        let index = usize::try_from(raw)
            .map_err(|_| scanner.error(format!("invalid column index {raw} at {}", scanner.pos)))?;

        let data_type = self.columns.get(index).map(|column| column.data_type);
        Ok(ColumnIndexOperand { index, data_type })
    }
}

fn reduce_comparison<B: FilterBuilder>(
    scanner: &mut Scanner<'_>,
    stack: &mut Vec<StackItem<B::Output>>,
    builder: &B,
) -> ParseResult<B::Output> {
    let code = scanner.parse_int32()?;
    let operator = Operator::from_comparison_code(code.into())
        .ok_or_else(|| scanner.error(format!("unknown op ending at {}", scanner.pos)))?;

    if operator.is_unary() {
        let operand = pop_operand(scanner, stack, operator)?;
        return builder
            .build_unary(operator, operand)
            .map_err(|err| scanner.build_error(err));
    }

    let right = pop_operand(scanner, stack, operator)?;
    let left = pop_operand(scanner, stack, operator)?;

    // constant-first comparisons are rewritten so the column is on the left
    let (operator, left, right) = match (&left, &right) {
        (OperandNode::ColumnIndex(_), _) | (_, OperandNode::Scalar(_) | OperandNode::Collection(_)) => {
            (operator, left, right)
        }
        _ => (operator.mirrored(), right, left),
    };

    builder
        .build_binary(operator, left, right)
        .map_err(|err| scanner.build_error(err))
}

fn reduce_logical<B: FilterBuilder>(
    scanner: &mut Scanner<'_>,
    stack: &mut Vec<StackItem<B::Output>>,
    builder: &B,
) -> ParseResult<B::Output> {
    let code = scanner.parse_int32()?;
    let operator = Operator::from_logical_code(code.into())
        .ok_or_else(|| scanner.error(format!("unknown op ending at {}", scanner.pos)))?;

    if operator == Operator::Not {
        let operand = pop_expression(scanner, stack, operator)?;
        return builder
            .build_logical_unary(operator, operand)
            .map_err(|err| scanner.build_error(err));
    }

    let right = pop_expression(scanner, stack, operator)?;
    let left = pop_expression(scanner, stack, operator)?;
    builder
        .build_logical_binary(operator, left, right)
        .map_err(|err| scanner.build_error(err))
}

fn pop_operand<T>(
    scanner: &Scanner<'_>,
    stack: &mut Vec<StackItem<T>>,
    operator: Operator,
) -> ParseResult<OperandNode> {
    match stack.pop() {
        Some(StackItem::Operand(operand)) => Ok(operand),
        _ => Err(scanner.missing_operands(operator)),
    }
}

fn pop_expression<T>(
    scanner: &Scanner<'_>,
    stack: &mut Vec<StackItem<T>>,
    operator: Operator,
) -> ParseResult<T> {
    match stack.pop() {
        Some(StackItem::Expression(output)) => Ok(output),
        _ => Err(scanner.missing_operands(operator)),
    }
}

/// Byte cursor over the filter string.
struct Scanner<'f> {
    filter: &'f str,
    bytes: &'f [u8],
    pos: usize,
}

impl<'f> Scanner<'f> {
    fn new(filter: &'f str) -> Self {
        Self {
            filter,
            bytes: filter.as_bytes(),
            pos: 0,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, message: impl Into<String>) -> FilterSyntaxError {
        FilterSyntaxError::Syntax {
            message: message.into(),
            filter: self.filter.to_string(),
        }
    }

    fn build_error(&self, source: BuildError) -> FilterSyntaxError {
        FilterSyntaxError::Build {
            source,
            filter: self.filter.to_string(),
        }
    }

    fn missing_operands(&self, operator: Operator) -> FilterSyntaxError {
        self.error(format!("missing operands for op {operator} at {}", self.pos))
    }

    fn parse_int(&mut self) -> ParseResult<i64> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }

        if self.pos == digits_start {
            self.pos = start;
            return Err(self.error(format!("numeric argument expected at {start}")));
        }

        let text = &self.filter[start..self.pos];
        text.parse::<i64>()
            .map_err(|_| self.error(format!("invalid numeric argument {text}")))
    }

    fn parse_int32(&mut self) -> ParseResult<i32> {
        let value = self.parse_int()?;
        i32::try_from(value).map_err(|_| {
            self.error(format!(
                "value {value} larger than intmax ending at {}",
                self.pos
            ))
        })
    }

    fn parse_data_type(&mut self) -> ParseResult<DataType> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(self.error(format!("datatype OID should follow at {}", self.pos)));
        }

        let oid = self.parse_int32()?;
        u32::try_from(oid)
            .ok()
            .and_then(DataType::from_oid)
            .ok_or_else(|| self.error(format!("invalid DataType OID at {}", self.pos - 1)))
    }

    fn expect(&mut self, delimiter: u8, message: &str) -> ParseResult<()> {
        if self.peek() != Some(delimiter) {
            return Err(self.error(format!("{message} at {}", self.pos)));
        }
        self.pos += 1;
        Ok(())
    }

    fn parse_length(&mut self) -> ParseResult<usize> {
        let length = self.parse_int32()?;
        usize::try_from(length)
            .map_err(|_| self.error(format!("invalid data length {length} at {}", self.pos)))
    }

    fn take_data(&mut self, length: usize) -> ParseResult<String> {
        let start = self.pos;
        let data = std::str::from_utf8(&self.bytes[start..start + length])
            .map_err(|_| self.error(format!("invalid UTF-8 data starting at {start}")))?;
        self.pos += length;
        Ok(data.to_string())
    }

    fn scalar_operand(&mut self) -> ParseResult<ScalarOperand> {
        let data_type = self.parse_data_type()?;
        if data_type.is_array() {
            return Err(self.error(format!(
                "expected scalar datatype, but got datatype with oid = {}",
                data_type.oid()
            )));
        }

        self.expect(b's', "data length delimiter 's' expected")?;
        let length = self.parse_length()?;

        let delimiter_at = self.pos;
        if delimiter_at + length > self.bytes.len() {
            return Err(self.error(format!(
                "data size larger than filter string starting at {delimiter_at}"
            )));
        }
        self.expect(b'd', "data delimiter 'd' expected")?;
        if self.pos + length > self.bytes.len() {
            return Err(self.error(format!(
                "data size larger than filter string starting at {delimiter_at}"
            )));
        }

        let value = self.take_data(length)?;
        Ok(ScalarOperand { data_type, value })
    }

    fn collection_operand(&mut self) -> ParseResult<CollectionOperand> {
        let data_type = self.parse_data_type()?;
        if !data_type.is_array() {
            return Err(self.error(format!(
                "expected non-scalar datatype, but got datatype with oid = {}",
                data_type.oid()
            )));
        }

        let mut values = Vec::new();
        while self.peek() == Some(b's') {
            self.pos += 1;
            let length = self.parse_length()?;
            self.expect(b'd', "data delimiter 'd' expected")?;
            if self.pos + length > self.bytes.len() {
                return Err(self.error("filter string is shorter than expected"));
            }
            values.push(self.take_data(length)?);
        }

        Ok(CollectionOperand { data_type, values })
    }
}
