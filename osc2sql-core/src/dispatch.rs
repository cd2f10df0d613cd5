//! Routes operation children to the entity emitters.

use std::io::{self, Write};

use log::debug;

use crate::{
    IdPolicy, IdResolution,
    document::{Entity, Operation, OperationChild, OperationKind},
    emit::{delete_node, delete_way, insert_node, insert_way},
    report::{ConversionReport, Diagnostic},
    sql::SqlWriter,
    walk::OperationVisitor,
};

/// Visitor that turns each operation into SQL.
///
/// Output errors abort the walk; everything else is recorded as a
/// [`Diagnostic`] and the offending child is skipped.
pub(crate) struct Dispatcher<'out, W> {
    out: &'out mut SqlWriter<W>,
    id_policy: IdPolicy,
    report: ConversionReport,
}

impl<'out, W: Write> Dispatcher<'out, W> {
    pub(crate) fn new(out: &'out mut SqlWriter<W>, id_policy: IdPolicy) -> Self {
        Self {
            out,
            id_policy,
            report: ConversionReport::default(),
        }
    }

    pub(crate) fn finish(self) -> ConversionReport {
        let mut report = self.report;
        report.summary.statements = self.out.statements();
        report
    }

    fn apply(&mut self, operation: OperationKind, entity: &Entity) -> io::Result<()> {
        let Some(id) = self.resolve_id(operation, entity) else {
            self.report.summary.record_skipped();
            return Ok(());
        };
        debug!("{operation} {} {id}", entity.kind());
        match operation {
            OperationKind::Create => self.insert(entity, id)?,
            OperationKind::Delete => self.delete(entity, id)?,
            OperationKind::Modify => {
                self.delete(entity, id)?;
                self.insert(entity, id)?;
            }
        }
        self.report.summary.record_entity(entity.kind());
        Ok(())
    }

    fn resolve_id(&mut self, operation: OperationKind, entity: &Entity) -> Option<i64> {
        let raw = &entity.meta().id;
        match self.id_policy.resolve(raw) {
            IdResolution::Exact(id) => Some(id),
            IdResolution::Coerced(id) => {
                self.report.diagnostics.push(Diagnostic::CoercedId {
                    operation,
                    entity: entity.kind(),
                    raw: raw.clone(),
                    id,
                });
                Some(id)
            }
            IdResolution::Invalid => {
                self.report.diagnostics.push(Diagnostic::InvalidId {
                    operation,
                    entity: entity.kind(),
                    raw: raw.clone(),
                });
                None
            }
        }
    }

    fn insert(&mut self, entity: &Entity, id: i64) -> io::Result<()> {
        match entity {
            Entity::Node(node) => insert_node(self.out, node, id),
            Entity::Way(way) => insert_way(self.out, way, id),
        }
    }

    fn delete(&mut self, entity: &Entity, id: i64) -> io::Result<()> {
        match entity {
            Entity::Node(_) => delete_node(self.out, id),
            Entity::Way(_) => delete_way(self.out, id),
        }
    }
}

impl<'doc, W: Write> OperationVisitor<'doc> for Dispatcher<'_, W> {
    type Error = io::Error;

    fn visit_operation(&mut self, operation: &'doc Operation) -> io::Result<()> {
        self.report.summary.record_operation();
        if operation.children.is_empty() {
            self.report.diagnostics.push(Diagnostic::EmptyOperation {
                operation: operation.kind,
            });
            return Ok(());
        }
        for child in &operation.children {
            match child {
                OperationChild::Entity(entity) => self.apply(operation.kind, entity)?,
                OperationChild::Nested(element) => {
                    self.report.diagnostics.push(Diagnostic::UnknownObject {
                        operation: operation.kind,
                        name: element.name().to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}
