//! Lowering: raw AST → normalized [`Module`].
//!
//! This is a pure structural transform.  It never rejects input: anything
//! the parser produced becomes a module, with problems recorded as
//! diagnostics.  Values are preserved verbatim — `mandatory` is not
//! collapsed to `current` here, and a bare DEFVAL identifier is not
//! disambiguated between enum label and OID reference; those decisions
//! belong to the resolver.

use log::debug;

use crate::ast;
use crate::base;
use crate::diagnostic::{codes, Diagnostic, DiagnosticConfig, Severity};
use crate::module::*;
use crate::parse::ParseDiagnostic;
use crate::pos::{LineTable, Span, Sp};

/// Lower every module in a parsed file.  Parse-time diagnostics are
/// reattributed to the module whose span contains them.
pub fn lower_file(
    root: &ast::Root,
    parse_diags: &[ParseDiagnostic],
    source: &[u8],
    config: &DiagnosticConfig,
) -> Vec<Module> {
    let line_table = LineTable::from_source(source);
    let mut modules: Vec<Module> = root
        .modules
        .iter()
        .map(|module| lower_module(module, &line_table, config))
        .collect();

    for diag in parse_diags {
        let target = modules
            .iter()
            .position(|m| span_contains(m.span, diag.span))
            .or(if modules.is_empty() { None } else { Some(0) });
        if let Some(idx) = target {
            let module = &mut modules[idx];
            let (line, column) = if diag.span.is_null() {
                (0, 0)
            } else {
                line_table.location(diag.span.start)
            };
            let converted = Diagnostic::new(Severity::Error, codes::PARSE_ERROR, diag.message.clone())
                .for_module(module.name.as_str())
                .at(line, column);
            if config.should_report(converted.code, converted.severity) {
                module.diagnostics.push(converted);
            }
        }
    }
    modules
}

fn span_contains(outer: Span, inner: Span) -> bool {
    outer.file_id == inner.file_id && outer.start <= inner.start && inner.end <= outer.end
}

struct Lowerer<'a> {
    module_name: String,
    line_table: &'a LineTable,
    config: &'a DiagnosticConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Lowerer<'_> {
    fn emit(&mut self, severity: Severity, code: &'static str, message: String, span: Span) {
        if !self.config.should_report(code, severity) {
            return;
        }
        let (line, column) = if span.is_null() {
            (0, 0)
        } else {
            self.line_table.location(span.start)
        };
        self.diagnostics.push(
            Diagnostic::new(severity, code, message)
                .for_module(self.module_name.clone())
                .at(line, column),
        );
    }
}

/// Lower one module.
pub fn lower_module(
    ast: &Sp<ast::ModuleAst>,
    line_table: &LineTable,
    config: &DiagnosticConfig,
) -> Module {
    let mut lowerer = Lowerer {
        module_name: ast.name.value.to_string(),
        line_table,
        config,
        diagnostics: Vec::new(),
    };

    // one Import row per symbol
    let mut imports = Vec::new();
    for clause in &ast.imports {
        for symbol in &clause.symbols {
            imports.push(Import {
                module: clause.module.value.clone(),
                symbol: symbol.value.clone(),
                span: symbol.span,
            });
        }
    }

    // any import from an SMIv2 base module makes the whole module SMIv2
    let language = if imports.iter().any(|import| base::is_smiv2_base_module(import.module.as_str())) {
        Language::Smiv2
    } else {
        Language::Smiv1
    };

    let definitions: Vec<Definition> = ast
        .definitions
        .iter()
        .map(|def| lower_definition(&mut lowerer, def))
        .collect();

    for def in &definitions {
        if def.name.value.contains_underscore() {
            lowerer.emit(
                Severity::Warning,
                codes::IDENTIFIER_UNDERSCORE,
                format!("identifier `{}` contains an underscore", def.name.value),
                def.name.span,
            );
        }
    }

    let module = Module {
        name: ast.name.value.clone(),
        language,
        imports,
        definitions,
        span: ast.span,
        diagnostics: lowerer.diagnostics,
        line_table: line_table.clone(),
    };
    check_module_identity(module, config)
}

/// Module-level lints that need the fully-lowered form.
fn check_module_identity(mut module: Module, config: &DiagnosticConfig) -> Module {
    let mut push = |module: &mut Module, severity, code: &'static str, message: String| {
        if config.should_report(code, severity) {
            let diag = Diagnostic::new(severity, code, message).for_module(module.name.as_str());
            module.diagnostics.push(diag);
        }
    };

    if module.language == Language::Smiv2 && !base::is_base_module(module.name.as_str()) {
        let missing_identity = module.identity().is_none();
        let stale_last_updated: Option<String> = module.identity().and_then(|identity| {
            identity
                .last_updated
                .clone()
                .filter(|lu| !identity.revisions.iter().any(|rev| rev.date == *lu))
        });

        if missing_identity {
            let message = format!("SMIv2 module `{}` has no MODULE-IDENTITY", module.name);
            push(&mut module, Severity::Error, codes::MISSING_MODULE_IDENTITY, message);
        }
        if let Some(last_updated) = stale_last_updated {
            let message = format!("LAST-UPDATED \"{last_updated}\" has no matching REVISION");
            push(&mut module, Severity::Minor, codes::REVISION_LAST_UPDATED, message);
        }
    }

    debug!(
        "lowered module {} ({}, {} definitions, {} imports)",
        module.name,
        module.language.descr(),
        module.definitions.len(),
        module.imports.len(),
    );
    module
}

fn lower_definition(lowerer: &mut Lowerer<'_>, def: &Sp<ast::Definition>) -> Definition {
    let name = def.name.clone();
    let kind = match &def.body {
        ast::DefBody::ObjectType(body) => DefKind::ObjectType(ObjectType {
            syntax: lower_syntax(lowerer, &body.syntax),
            units: body.units.clone().map(|s| s.value),
            access: body.access.clone(),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            index: body
                .index
                .iter()
                .map(|entry| IndexEntry {
                    name: sp!(entry.span => entry.name.clone()),
                    implied: entry.implied,
                })
                .collect(),
            augments: body.augments.clone(),
            defval: body.defval.as_ref().map(|dv| lower_defval(&dv.value)),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::ModuleIdentity(body) => DefKind::ModuleIdentity(ModuleIdentity {
            last_updated: body.last_updated.clone().map(|s| s.value),
            organization: body.organization.clone().map(|s| s.value),
            contact_info: body.contact_info.clone().map(|s| s.value),
            description: body.description.clone().map(|s| s.value),
            revisions: body
                .revisions
                .iter()
                .map(|rev| Revision {
                    date: rev.date.value.clone(),
                    description: rev.description.clone().map(|s| s.value),
                })
                .collect(),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::ObjectIdentity(body) => DefKind::ObjectIdentity(ObjectIdentity {
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::NotificationType(body) => DefKind::Notification(Notification {
            objects: body.objects.clone(),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            oid: Some(lower_oid(&body.oid)),
            trap: None,
        }),

        ast::DefBody::TrapType(body) => DefKind::Notification(Notification {
            objects: body.variables.clone(),
            status: None,
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            oid: None,
            trap: Some(TrapInfo {
                enterprise: match &body.enterprise.value {
                    ast::EnterpriseRef::Name(name) => {
                        EnterpriseRef::Name(sp!(body.enterprise.span => name.clone()))
                    }
                    ast::EnterpriseRef::Oid(oid) => EnterpriseRef::Oid(OidAssignment {
                        components: oid.components.iter().map(lower_oid_component).collect(),
                        span: body.enterprise.span,
                    }),
                },
                number: body.number.value,
            }),
        }),

        ast::DefBody::ObjectGroup(body) => DefKind::ObjectGroup(Group {
            members: body.objects.clone(),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::NotificationGroup(body) => DefKind::NotificationGroup(Group {
            members: body.notifications.clone(),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::ModuleCompliance(body) => DefKind::ModuleCompliance(ModuleCompliance {
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            modules: body
                .modules
                .iter()
                .map(|section| ComplianceModule {
                    module: section.module.clone(),
                    mandatory_groups: section.mandatory_groups.clone(),
                    requirements: section
                        .requirements
                        .iter()
                        .map(|req| lower_compliance_requirement(lowerer, req))
                        .collect(),
                })
                .collect(),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::AgentCapabilities(body) => DefKind::AgentCapabilities(AgentCapabilities {
            product_release: body.product_release.clone().map(|s| s.value),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            supports: body
                .supports
                .iter()
                .map(|supports| Supports {
                    module: supports.module.clone(),
                    includes: supports.includes.clone(),
                    variations: supports
                        .variations
                        .iter()
                        .map(|var| Variation {
                            name: var.name.clone(),
                            syntax: var.syntax.as_ref().map(|s| lower_syntax(lowerer, s)),
                            write_syntax: var.write_syntax.as_ref().map(|s| lower_syntax(lowerer, s)),
                            access: var.access.clone().map(|s| s.value),
                            creation_requires: var.creation_requires.clone(),
                            defval: var.defval.as_ref().map(|dv| lower_defval(&dv.value)),
                            description: var.description.clone().map(|s| s.value),
                        })
                        .collect(),
                })
                .collect(),
            oid: lower_oid(&body.oid),
        }),

        ast::DefBody::TypeAssignment(body) => DefKind::TypeDef(TypeDef {
            syntax: lower_syntax(lowerer, &body.syntax),
            is_textual_convention: body.is_textual_convention,
            display_hint: body.display_hint.clone().map(|s| s.value),
            status: body.status.clone(),
            description: body.description.clone().map(|s| s.value),
            reference: body.reference.clone().map(|s| s.value),
            base_override: None,
        }),

        ast::DefBody::ValueAssignment(body) => {
            DefKind::ValueAssignment(ValueAssignment { oid: lower_oid(&body.oid) })
        }
    };
    Definition { name, kind }
}

fn lower_compliance_requirement(
    lowerer: &mut Lowerer<'_>,
    req: &ast::ComplianceRequirementAst,
) -> ComplianceRequirement {
    match req {
        ast::ComplianceRequirementAst::Group { name, description } => ComplianceRequirement::Group {
            name: name.clone(),
            description: description.clone().map(|s| s.value),
        },
        ast::ComplianceRequirementAst::Object {
            name,
            syntax,
            write_syntax,
            min_access,
            description,
        } => ComplianceRequirement::Object {
            name: name.clone(),
            syntax: syntax.as_ref().map(|s| lower_syntax(lowerer, s)),
            write_syntax: write_syntax.as_ref().map(|s| lower_syntax(lowerer, s)),
            min_access: min_access.clone().map(|s| s.value),
            description: description.clone().map(|s| s.value),
        },
    }
}

fn lower_syntax(lowerer: &mut Lowerer<'_>, syntax: &Sp<ast::SyntaxAst>) -> TypeSyntax {
    match &syntax.value {
        ast::SyntaxAst::TypeRef { name, named_numbers: None } => TypeSyntax::TypeRef(name.clone()),
        ast::SyntaxAst::TypeRef { name, named_numbers: Some(named) } => TypeSyntax::IntegerEnum {
            base: Some(name.clone()),
            named_numbers: lower_named_numbers(named),
        },
        ast::SyntaxAst::IntegerEnum { named_numbers } => TypeSyntax::IntegerEnum {
            base: None,
            named_numbers: lower_named_numbers(named_numbers),
        },
        ast::SyntaxAst::Bits { named_bits } => TypeSyntax::Bits {
            named_bits: lower_named_numbers(named_bits),
        },
        ast::SyntaxAst::OctetString => TypeSyntax::OctetString,
        ast::SyntaxAst::ObjectIdentifier => TypeSyntax::ObjectIdentifier,
        ast::SyntaxAst::SequenceOf { entry } => TypeSyntax::SequenceOf { entry: entry.clone() },
        ast::SyntaxAst::Sequence { fields } => TypeSyntax::Sequence {
            fields: fields
                .iter()
                .map(|field| (field.name.clone(), lower_syntax(lowerer, &field.syntax)))
                .collect(),
        },
        ast::SyntaxAst::Choice { alternatives } => {
            // CHOICE is normalized to its first alternative; outside the
            // base-module meta types a multi-alternative CHOICE loses
            // information, so flag it rather than guess
            if alternatives.len() > 1 {
                lowerer.emit(
                    Severity::Warning,
                    codes::PARSE_ERROR,
                    format!("CHOICE with {} alternatives flattened to its first", alternatives.len()),
                    syntax.span,
                );
            }
            match alternatives.first() {
                Some(first) => lower_syntax(lowerer, &first.syntax),
                None => {
                    lowerer.emit(
                        Severity::Warning,
                        codes::PARSE_ERROR,
                        "empty CHOICE; treating as OCTET STRING".to_owned(),
                        syntax.span,
                    );
                    TypeSyntax::OctetString
                }
            }
        }
        ast::SyntaxAst::Constrained { base, constraint } => TypeSyntax::Constrained {
            base: Box::new(lower_syntax(lowerer, base)),
            constraint: lower_constraint(&constraint.value),
        },
    }
}

fn lower_named_numbers(named: &[Sp<ast::NamedNumberAst>]) -> Vec<NamedNumber> {
    named
        .iter()
        .map(|nn| NamedNumber { name: nn.value.name.value.clone(), value: nn.value.value })
        .collect()
}

fn lower_constraint(constraint: &ast::ConstraintAst) -> Constraint {
    let lower_items = |items: &[ast::RangeAst]| -> Vec<RangeItem> {
        items
            .iter()
            .map(|range| {
                let low = lower_endpoint(range.low.value);
                let high = range.high.map(|h| lower_endpoint(h.value)).unwrap_or(low);
                RangeItem { low, high }
            })
            .collect()
    };
    match constraint {
        ast::ConstraintAst::Size(items) => Constraint::Size(lower_items(items)),
        ast::ConstraintAst::Range(items) => Constraint::Range(lower_items(items)),
    }
}

fn lower_endpoint(endpoint: ast::RangeEndpointAst) -> RangeEndpoint {
    match endpoint {
        ast::RangeEndpointAst::Signed(v) => RangeEndpoint::Signed(v),
        ast::RangeEndpointAst::Unsigned(v) => RangeEndpoint::Unsigned(v),
        ast::RangeEndpointAst::Min => RangeEndpoint::Min,
        ast::RangeEndpointAst::Max => RangeEndpoint::Max,
    }
}

fn lower_oid(oid: &Sp<ast::OidAst>) -> OidAssignment {
    OidAssignment {
        components: oid.components.iter().map(lower_oid_component).collect(),
        span: oid.span,
    }
}

fn lower_oid_component(component: &Sp<ast::OidComponentAst>) -> Sp<OidComponent> {
    let value = match &component.value {
        ast::OidComponentAst::Name(name) => OidComponent::Name(name.clone()),
        ast::OidComponentAst::Number(n) => OidComponent::Number(*n),
        ast::OidComponentAst::NamedNumber(name, n) => OidComponent::NamedNumber(name.clone(), *n),
        ast::OidComponentAst::QualifiedName(module, name) => {
            OidComponent::QualifiedName(module.clone(), name.clone())
        }
        ast::OidComponentAst::QualifiedNamedNumber(module, name, n) => {
            OidComponent::QualifiedNamedNumber(module.clone(), name.clone(), *n)
        }
    };
    sp!(component.span => value)
}

fn lower_defval(defval: &ast::DefValAst) -> DefVal {
    match defval {
        ast::DefValAst::Integer(v) => DefVal::Integer(*v),
        ast::DefValAst::Unsigned(v) => DefVal::Unsigned(*v),
        ast::DefValAst::Str(s) => DefVal::String(s.clone()),
        ast::DefValAst::Hex(s) => DefVal::HexString(s.clone()),
        ast::DefValAst::Bin(s) => DefVal::BinaryString(s.clone()),
        // could be an enum label or an OID reference; the semantics phase
        // decides once the object's syntax is resolved
        ast::DefValAst::Ident(name) => DefVal::Enum(name.clone()),
        ast::DefValAst::Bits(labels) => {
            DefVal::Bits(labels.iter().map(|l| l.value.clone()).collect())
        }
        ast::DefValAst::OidValue(components) => {
            // a single-name OID value is just a reference to that node
            if let [only] = components.as_slice() {
                if let ast::OidComponentAst::Name(name) = &only.value {
                    return DefVal::OidRef(name.clone());
                }
            }
            DefVal::OidValue(components.iter().map(lower_oid_component).collect())
        }
        ast::DefValAst::Unparsed => DefVal::Unparsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Strictness;
    use crate::parse;

    fn lower_source(source: &str) -> Vec<Module> {
        let config = DiagnosticConfig::from_strictness(Strictness::Normal);
        let (root, diags) = parse::parse_file(None, source.as_bytes());
        lower_file(&root, &diags, source.as_bytes(), &config)
    }

    #[test]
    fn language_detection_from_imports() {
        let modules = lower_source(
            "A-MIB DEFINITIONS ::= BEGIN
             IMPORTS OBJECT-TYPE FROM SNMPv2-SMI;
             aMIB MODULE-IDENTITY LAST-UPDATED \"202401010000Z\"
                 ORGANIZATION \"o\" CONTACT-INFO \"c\" DESCRIPTION \"d\"
                 REVISION \"202401010000Z\" DESCRIPTION \"r\"
                 ::= { enterprises 1 }
             END
             B-MIB DEFINITIONS ::= BEGIN
             IMPORTS OBJECT-TYPE FROM RFC-1212;
             END",
        );
        assert_eq!(modules[0].language, Language::Smiv2);
        assert_eq!(modules[1].language, Language::Smiv1);
    }

    #[test]
    fn imports_are_flattened_per_symbol() {
        let modules = lower_source(
            "A-MIB DEFINITIONS ::= BEGIN
             IMPORTS a, b FROM X-MIB c FROM Y-MIB;
             END",
        );
        let imports = &modules[0].imports;
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].symbol, "a");
        assert_eq!(imports[0].module, "X-MIB");
        assert_eq!(imports[2].module, "Y-MIB");
    }

    #[test]
    fn trap_type_becomes_notification_without_oid() {
        let modules = lower_source(
            r#"A-MIB DEFINITIONS ::= BEGIN
            linkDown TRAP-TYPE ENTERPRISE snmp VARIABLES { ifIndex }
                DESCRIPTION "link down" ::= 2
            END"#,
        );
        let def = &modules[0].definitions[0];
        match &def.kind {
            DefKind::Notification(notif) => {
                assert!(notif.oid.is_none());
                let trap = notif.trap.as_ref().unwrap();
                assert_eq!(trap.number, 2);
                assert_eq!(notif.objects.len(), 1);
            }
            other => panic!("wrong kind: {other:?}"),
        }
    }

    #[test]
    fn missing_module_identity_is_flagged() {
        let modules = lower_source(
            "A-MIB DEFINITIONS ::= BEGIN
             IMPORTS OBJECT-TYPE FROM SNMPv2-SMI;
             END",
        );
        let diag = modules[0]
            .diagnostics
            .iter()
            .find(|d| d.code == codes::MISSING_MODULE_IDENTITY)
            .expect("missing-module-identity diagnostic");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!((diag.line, diag.column), (0, 0));
    }

    #[test]
    fn revision_mismatch_is_minor() {
        let modules = lower_source(
            r#"A-MIB DEFINITIONS ::= BEGIN
            IMPORTS MODULE-IDENTITY FROM SNMPv2-SMI;
            aMIB MODULE-IDENTITY
                LAST-UPDATED "202401010000Z"
                ORGANIZATION "o" CONTACT-INFO "c" DESCRIPTION "d"
                REVISION "202301010000Z" DESCRIPTION "older"
                ::= { enterprises 1 }
            END"#,
        );
        let diag = modules[0]
            .diagnostics
            .iter()
            .find(|d| d.code == codes::REVISION_LAST_UPDATED)
            .expect("revision-last-updated diagnostic");
        assert_eq!(diag.severity, Severity::Minor);
    }

    #[test]
    fn choice_flattens_to_first_alternative() {
        let modules = lower_source(
            "RFC1155-LIKE DEFINITIONS ::= BEGIN
             NetworkAddress ::= CHOICE { internet IpAddress }
             END",
        );
        match &modules[0].definitions[0].kind {
            DefKind::TypeDef(td) => match &td.syntax {
                TypeSyntax::TypeRef(name) => assert_eq!(name.value, "IpAddress"),
                other => panic!("wrong syntax: {other:?}"),
            },
            other => panic!("wrong kind: {other:?}"),
        }
    }

    #[test]
    fn defval_identifier_stays_ambiguous() {
        let modules = lower_source(
            "A-MIB DEFINITIONS ::= BEGIN
             x OBJECT-TYPE SYNTAX INTEGER MAX-ACCESS read-only STATUS current
               DEFVAL { active } ::= { y 1 }
             END",
        );
        match &modules[0].definitions[0].kind {
            DefKind::ObjectType(obj) => {
                assert!(matches!(obj.defval, Some(DefVal::Enum(_))));
                // access/status kept verbatim
                assert_eq!(obj.access.as_ref().unwrap().value, "read-only");
                assert_eq!(obj.status.as_ref().unwrap().value, "current");
            }
            other => panic!("wrong kind: {other:?}"),
        }
    }

    #[test]
    fn defval_single_name_oid_value_is_a_reference() {
        let modules = lower_source(
            "A-MIB DEFINITIONS ::= BEGIN
             x OBJECT-TYPE SYNTAX OBJECT IDENTIFIER MAX-ACCESS read-only STATUS current
               DEFVAL { { sysDescr } } ::= { y 1 }
             END",
        );
        match &modules[0].definitions[0].kind {
            DefKind::ObjectType(obj) => {
                assert!(matches!(&obj.defval, Some(DefVal::OidRef(name)) if *name == "sysDescr"));
            }
            other => panic!("wrong kind: {other:?}"),
        }
    }
}
