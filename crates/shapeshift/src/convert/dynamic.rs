// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in Dynamic (rule-based leaf) converters.

use super::number::Number;
use super::DynamicConverter;
use crate::error::{ConvertError, Result};
use crate::types::{ClassId, ScalarKind, Shape, TypeSystem};
use crate::value::{EnumValue, Value};
use std::sync::Arc;

fn scalar_kind(types: &TypeSystem, id: ClassId) -> Option<ScalarKind> {
    match types.class(id).shape() {
        Shape::Scalar(kind) => Some(kind),
        _ => None,
    }
}

fn is_enum(types: &TypeSystem, id: ClassId) -> bool {
    matches!(types.class(id).shape(), Shape::Enum)
}

/// Values already assignable to the target pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityRule;

impl DynamicConverter for IdentityRule {
    fn name(&self) -> &str {
        "identity"
    }

    fn priority(&self) -> i32 {
        i32::MIN
    }

    fn supports(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool {
        types.is_assignable(target, source)
    }

    fn convert(&self, _types: &TypeSystem, value: Value, _target: ClassId) -> Result<Value> {
        Ok(value)
    }
}

/// Enum constants by name or ordinal, and back.
///
/// Names match exactly first, then case-insensitively after trimming.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumRule;

impl EnumRule {
    fn to_enum(types: &TypeSystem, value: &Value, target: ClassId) -> Result<Value> {
        let class = types.class(target);
        let index = match value {
            Value::String(text) => lookup_variant(class.variants(), text),
            Value::Enum(e) => lookup_variant(class.variants(), &e.name),
            other => match Number::of(other) {
                Some(Number::Int(i)) => usize::try_from(i)
                    .ok()
                    .filter(|i| *i < class.variants().len()),
                _ => None,
            },
        };
        let Some(ordinal) = index else {
            return Err(ConvertError::failed(
                value,
                class.name(),
                "no matching enum constant",
            ));
        };
        Ok(Value::Enum(EnumValue {
            class: target,
            name: Arc::clone(&class.variants()[ordinal]),
            ordinal,
        }))
    }
}

fn lookup_variant(variants: &[Arc<str>], name: &str) -> Option<usize> {
    variants.iter().position(|v| &**v == name).or_else(|| {
        let name = name.trim();
        variants.iter().position(|v| v.eq_ignore_ascii_case(name))
    })
}

impl DynamicConverter for EnumRule {
    fn name(&self) -> &str {
        "enum"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn supports(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool {
        let textual_or_integer = |id: ClassId| {
            id == ClassId::STRING || scalar_kind(types, id).is_some_and(ScalarKind::is_integer)
        };
        if is_enum(types, target) {
            textual_or_integer(source) || is_enum(types, source)
        } else {
            is_enum(types, source) && textual_or_integer(target)
        }
    }

    fn convert(&self, types: &TypeSystem, value: Value, target: ClassId) -> Result<Value> {
        if is_enum(types, target) {
            return Self::to_enum(types, &value, target);
        }
        let Value::Enum(e) = &value else {
            return Err(ConvertError::failed(&value, types.class_name(target), "not an enum"));
        };
        match scalar_kind(types, target) {
            Some(ScalarKind::String) => Ok(Value::String(e.name.to_string())),
            Some(kind) => Number::Int(e.ordinal as i128)
                .into_kind(kind)
                .map_err(|cause| ConvertError::failed(&value, kind.name(), cause)),
            None => Err(ConvertError::unsupported(
                types.class_name(e.class),
                types.class_name(target),
            )),
        }
    }
}

/// Coercion between numeric kinds, `bool` and `char`.
///
/// Range-checked: an out-of-range value fails instead of wrapping. Floats
/// truncate toward zero when an integer is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericRule;

fn numeric_like(kind: ScalarKind) -> bool {
    kind.is_numeric() || matches!(kind, ScalarKind::Bool | ScalarKind::Char)
}

impl DynamicConverter for NumericRule {
    fn name(&self) -> &str {
        "numeric"
    }

    fn supports(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool {
        matches!(
            (scalar_kind(types, source), scalar_kind(types, target)),
            (Some(s), Some(t)) if numeric_like(s) && numeric_like(t)
        )
    }

    fn convert(&self, types: &TypeSystem, value: Value, target: ClassId) -> Result<Value> {
        let kind = scalar_kind(types, target)
            .ok_or_else(|| ConvertError::failed(&value, types.class_name(target), "not a scalar"))?;
        let number = Number::of(&value)
            .ok_or_else(|| ConvertError::failed(&value, kind.name(), "not a number"))?;
        number
            .into_kind(kind)
            .map_err(|cause| ConvertError::failed(&value, kind.name(), cause))
    }
}

/// Single-argument factories declared on the target class.
#[derive(Debug, Default, Clone, Copy)]
pub struct FactoryRule;

impl DynamicConverter for FactoryRule {
    fn name(&self) -> &str {
        "factory"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn supports(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool {
        types
            .class(target)
            .factories()
            .iter()
            .any(|f| types.is_assignable(f.param(), source))
    }

    fn convert(&self, types: &TypeSystem, value: Value, target: ClassId) -> Result<Value> {
        let class = types.class(target);
        let source = value.class_id();
        let factory = class
            .factories()
            .iter()
            .find(|f| types.is_assignable(f.param(), source))
            .ok_or_else(|| {
                ConvertError::unsupported(types.class_name(source), class.name())
            })?;
        factory.call(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassBuilder;

    fn color(types: &TypeSystem) -> ClassId {
        types
            .define(ClassBuilder::enumeration("Color", ["Red", "Green", "Blue"]))
            .expect("define")
    }

    #[test]
    fn test_enum_by_name_and_ordinal() {
        let types = TypeSystem::new();
        let color = color(&types);
        let rule = EnumRule;
        assert!(rule.supports(&types, ClassId::STRING, color));
        assert!(rule.supports(&types, ClassId::I32, color));
        assert!(!rule.supports(&types, ClassId::F64, color));

        let green = rule
            .convert(&types, Value::from(" green "), color)
            .expect("by name");
        assert_eq!(green.as_enum().map(|e| e.ordinal), Some(1));

        let blue = rule.convert(&types, Value::I32(2), color).expect("by ordinal");
        assert_eq!(blue.as_enum().map(|e| &*e.name), Some("Blue"));

        assert!(rule.convert(&types, Value::I32(3), color).is_err());
        assert!(rule.convert(&types, Value::from("Purple"), color).is_err());
    }

    #[test]
    fn test_enum_to_text_and_ordinal() {
        let types = TypeSystem::new();
        let color = color(&types);
        let red = EnumRule
            .convert(&types, Value::from("Red"), color)
            .expect("red");
        assert_eq!(
            EnumRule.convert(&types, red.clone(), ClassId::STRING).ok(),
            Some(Value::from("Red"))
        );
        assert_eq!(
            EnumRule.convert(&types, red, ClassId::U8).ok(),
            Some(Value::U8(0))
        );
    }

    #[test]
    fn test_numeric_rule() {
        let types = TypeSystem::new();
        let rule = NumericRule;
        assert!(rule.supports(&types, ClassId::I64, ClassId::I8));
        assert!(rule.supports(&types, ClassId::BOOL, ClassId::F32));
        assert!(!rule.supports(&types, ClassId::STRING, ClassId::I32));
        assert_eq!(
            rule.convert(&types, Value::I64(-3), ClassId::I16).ok(),
            Some(Value::I16(-3))
        );
        assert!(rule.convert(&types, Value::I64(1 << 40), ClassId::I32).is_err());
    }

    #[test]
    fn test_factory_rule() {
        let types = TypeSystem::new();
        let meters = types
            .define(
                ClassBuilder::bean("Meters")
                    .property("value", crate::types::Type::F64)
                    .factory(ClassId::F64, |v| {
                        Ok(Value::Bean(
                            crate::value::BeanValue::new(ClassId::OBJECT).with("value", v),
                        ))
                    }),
            )
            .expect("define");
        assert!(FactoryRule.supports(&types, ClassId::F64, meters));
        assert!(!FactoryRule.supports(&types, ClassId::STRING, meters));
        let out = FactoryRule
            .convert(&types, Value::F64(2.0), meters)
            .expect("factory");
        assert_eq!(out.as_bean().and_then(|b| b.get("value")), Some(&Value::F64(2.0)));
    }
}
