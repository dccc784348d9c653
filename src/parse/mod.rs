//! Hand-written recursive-descent parser for the SMI subset of ASN.1.
//!
//! The parser is tolerant: a malformed definition produces a diagnostic and
//! the parser skims forward to the next plausible definition head, so one
//! bad macro invocation never takes down the module around it.

use codespan_reporting::diagnostic as cs_diag;

use crate::ast::*;
use crate::ident::Ident;
use crate::pos::{FileId, Span, Sp};
use crate::token::Token;

pub mod lexer;
use lexer::Lexer;

/// A parse-time finding.  Always `Error` severity; these are folded into the
/// module's diagnostics (code `parse-error`) during lowering.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    pub span: Span,
    pub message: String,
}

impl ParseDiagnostic {
    pub fn new(span: Span, message: impl Into<String>) -> ParseDiagnostic {
        ParseDiagnostic { span, message: message.into() }
    }

    /// Render as a codespan diagnostic for terminal output with source context.
    pub fn to_codespan(&self) -> cs_diag::Diagnostic<FileId> {
        cs_diag::Diagnostic::error()
            .with_message(self.message.clone())
            .with_labels(vec![cs_diag::Label::primary(self.span.file_id, self.span)])
    }
}

/// Marker that a diagnostic was already emitted; the caller should recover.
#[derive(Debug, Copy, Clone)]
pub struct Recovered;

type PResult<T> = Result<T, Recovered>;

/// Parse one source file, which may contain several modules.
pub fn parse_file(file_id: FileId, source: &[u8]) -> (Root, Vec<ParseDiagnostic>) {
    let mut parser = Parser::new(file_id, source);
    let mut root = Root::default();
    while parser.peek().is_some() {
        match parser.parse_module() {
            Ok(module) => root.modules.push(module),
            Err(Recovered) => {
                // a broken module header leaves us with no anchor; give up on
                // the rest of the file
                break;
            }
        }
    }
    let diags = parser.diags;
    (root, diags)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Vec<Sp<Token>>,
    diags: Vec<ParseDiagnostic>,
    file_id: FileId,
    last_span: Span,
}

impl<'a> Parser<'a> {
    fn new(file_id: FileId, source: &'a [u8]) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(file_id, source),
            lookahead: Vec::with_capacity(2),
            diags: Vec::new(),
            file_id,
            last_span: Span::new(file_id, 0u32, 0u32),
        }
    }

    // ------------------------------------------------------------------
    // token plumbing

    fn fill(&mut self, n: usize) {
        while self.lookahead.len() < n {
            match self.lexer.next_token(&mut self.diags) {
                Some(token) => self.lookahead.push(token),
                None => break,
            }
        }
    }

    fn peek(&mut self) -> Option<&Sp<Token>> {
        self.fill(1);
        self.lookahead.first()
    }

    fn peek2(&mut self) -> Option<&Sp<Token>> {
        self.fill(2);
        self.lookahead.get(1)
    }

    fn next(&mut self) -> Option<Sp<Token>> {
        self.fill(1);
        if self.lookahead.is_empty() {
            return None;
        }
        let token = self.lookahead.remove(0);
        self.last_span = token.span;
        Some(token)
    }

    fn peek_word(&mut self) -> Option<&str> {
        match self.peek() {
            Some(sp) => sp.value.word(),
            None => None,
        }
    }

    fn at_word(&mut self, word: &str) -> bool {
        self.peek_word() == Some(word)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.at_word(word) {
            self.next();
            true
        } else {
            false
        }
    }

    fn eat_token(&mut self, token: &Token) -> bool {
        if self.peek().map(|sp| &sp.value) == Some(token) {
            self.next();
            true
        } else {
            false
        }
    }

    fn error_at(&mut self, span: Span, message: impl Into<String>) -> Recovered {
        self.diags.push(ParseDiagnostic::new(span, message));
        Recovered
    }

    fn error_here(&mut self, message: impl Into<String>) -> Recovered {
        let span = self.peek().map(|sp| sp.span).unwrap_or(self.last_span);
        self.error_at(span, message)
    }

    fn expect_token(&mut self, expected: &Token) -> PResult<Span> {
        match self.next() {
            Some(sp) if sp.value == *expected => Ok(sp.span),
            Some(sp) => {
                let descr = sp.value.descr();
                Err(self.error_at(sp.span, format!("expected `{expected}`, found {descr}")))
            }
            None => Err(self.error_here(format!("expected `{expected}`, found end of file"))),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> PResult<Span> {
        match self.next() {
            Some(sp) if sp.value.word() == Some(keyword) => Ok(sp.span),
            Some(sp) => {
                let descr = sp.value.descr();
                Err(self.error_at(sp.span, format!("expected `{keyword}`, found {descr}")))
            }
            None => Err(self.error_here(format!("expected `{keyword}`, found end of file"))),
        }
    }

    fn expect_word(&mut self) -> PResult<Sp<String>> {
        match self.next() {
            Some(sp) => match sp.value {
                Token::Word(word) => Ok(sp!(sp.span => word)),
                other => {
                    let descr = other.descr();
                    Err(self.error_at(sp.span, format!("expected identifier, found {descr}")))
                }
            },
            None => Err(self.error_here("expected identifier, found end of file")),
        }
    }

    fn expect_ident(&mut self) -> PResult<Sp<Ident>> {
        let word = self.expect_word()?;
        match word.value.parse::<Ident>() {
            Ok(ident) => Ok(sp!(word.span => ident)),
            Err(err) => Err(self.error_at(word.span, format!("bad identifier: {err}"))),
        }
    }

    fn expect_string(&mut self) -> PResult<Sp<String>> {
        match self.next() {
            Some(sp) => match sp.value {
                Token::Str(text) => Ok(sp!(sp.span => text)),
                other => {
                    let descr = other.descr();
                    Err(self.error_at(sp.span, format!("expected quoted string, found {descr}")))
                }
            },
            None => Err(self.error_here("expected quoted string, found end of file")),
        }
    }

    fn expect_u32(&mut self) -> PResult<Sp<u32>> {
        match self.next() {
            Some(sp) => match sp.value {
                Token::Number(n) => {
                    if n > u32::MAX as u64 {
                        self.diags.push(ParseDiagnostic::new(
                            sp.span,
                            format!("arc {n} does not fit in 32 bits"),
                        ));
                        Ok(sp!(sp.span => u32::MAX))
                    } else {
                        Ok(sp!(sp.span => n as u32))
                    }
                }
                other => {
                    let descr = other.descr();
                    Err(self.error_at(sp.span, format!("expected number, found {descr}")))
                }
            },
            None => Err(self.error_here("expected number, found end of file")),
        }
    }

    // ------------------------------------------------------------------
    // module structure

    fn parse_module(&mut self) -> PResult<Sp<ModuleAst>> {
        let name = self.expect_ident()?;
        self.expect_keyword("DEFINITIONS")?;
        // tolerate tag-default words (`AUTOMATIC TAGS`, `PIB-DEFINITIONS` tails)
        while !matches!(self.peek().map(|sp| &sp.value), Some(Token::Assign) | None) {
            self.next();
        }
        self.expect_token(&Token::Assign)?;
        self.expect_keyword("BEGIN")?;

        if self.eat_word("EXPORTS") {
            while let Some(token) = self.next() {
                if token.value == Token::Semi {
                    break;
                }
            }
        }

        let imports = if self.eat_word("IMPORTS") {
            self.parse_import_clauses()?
        } else {
            Vec::new()
        };

        let mut definitions = Vec::new();
        loop {
            match self.peek() {
                None => {
                    self.error_here(format!("missing END in module `{name}`"));
                    break;
                }
                Some(sp) if sp.value.word() == Some("END") => {
                    self.next();
                    break;
                }
                Some(_) => {}
            }
            match self.parse_definition() {
                Ok(Some(def)) => definitions.push(def),
                Ok(None) => {}
                Err(Recovered) => self.skim_definition(),
            }
        }

        let span = name.span.merge(self.last_span);
        Ok(sp!(span => ModuleAst { name, imports, definitions }))
    }

    fn parse_import_clauses(&mut self) -> PResult<Vec<ImportClause>> {
        let mut clauses = Vec::new();
        if self.eat_token(&Token::Semi) {
            return Ok(clauses);
        }
        'groups: loop {
            let mut symbols = Vec::new();
            let group_start = match self.peek() {
                Some(sp) => sp.span,
                None => return Err(self.error_here("unterminated IMPORTS")),
            };
            loop {
                // BITS can legally appear in an import list even though it
                // lexes like any other word
                let symbol = self.expect_ident()?;
                symbols.push(symbol);
                if self.eat_token(&Token::Comma) {
                    continue;
                }
                self.expect_keyword("FROM")?;
                break;
            }
            let module = self.expect_ident()?;
            let span = group_start.merge(module.span);
            clauses.push(ImportClause { symbols, module, span });
            match self.peek().map(|sp| &sp.value) {
                Some(Token::Semi) => {
                    self.next();
                    break 'groups;
                }
                Some(Token::Word(_)) => continue 'groups,
                _ => {
                    // IMPORTS sections in the wild sometimes lack the final
                    // semicolon; treat anything else as the end
                    break 'groups;
                }
            }
        }
        Ok(clauses)
    }

    // ------------------------------------------------------------------
    // definitions

    fn parse_definition(&mut self) -> PResult<Option<Sp<Definition>>> {
        let name = self.expect_ident()?;
        let span = name.span;

        // own the head word so arm guards can look further ahead
        let head = self.peek_word().map(str::to_owned);
        let body = match head.as_deref() {
            Some("MACRO") => {
                self.next();
                self.skip_macro_body();
                return Ok(None);
            }
            Some("OBJECT") if self.peek2().and_then(|sp| sp.value.word()) == Some("IDENTIFIER") => {
                self.next();
                self.next();
                self.expect_token(&Token::Assign)?;
                let oid = self.parse_oid_assignment()?;
                DefBody::ValueAssignment(ValueAssignmentBody { oid })
            }
            Some("OBJECT-TYPE") => {
                self.next();
                DefBody::ObjectType(self.parse_object_type_body()?)
            }
            Some("MODULE-IDENTITY") => {
                self.next();
                DefBody::ModuleIdentity(self.parse_module_identity_body()?)
            }
            Some("OBJECT-IDENTITY") => {
                self.next();
                DefBody::ObjectIdentity(self.parse_object_identity_body()?)
            }
            Some("NOTIFICATION-TYPE") => {
                self.next();
                DefBody::NotificationType(self.parse_notification_type_body()?)
            }
            Some("TRAP-TYPE") => {
                self.next();
                DefBody::TrapType(self.parse_trap_type_body()?)
            }
            Some("OBJECT-GROUP") => {
                self.next();
                DefBody::ObjectGroup(self.parse_object_group_body()?)
            }
            Some("NOTIFICATION-GROUP") => {
                self.next();
                DefBody::NotificationGroup(self.parse_notification_group_body()?)
            }
            Some("MODULE-COMPLIANCE") => {
                self.next();
                DefBody::ModuleCompliance(self.parse_module_compliance_body()?)
            }
            Some("AGENT-CAPABILITIES") => {
                self.next();
                DefBody::AgentCapabilities(self.parse_agent_capabilities_body()?)
            }
            _ if matches!(self.peek().map(|sp| &sp.value), Some(Token::Assign)) => {
                self.next();
                DefBody::TypeAssignment(self.parse_type_assignment_body()?)
            }
            Some(_) => {
                // a value assignment of some non-OID type, e.g.
                // `someNumber INTEGER ::= 5`; parse and drop it
                let _ = self.parse_syntax()?;
                self.expect_token(&Token::Assign)?;
                self.skip_value();
                return Ok(None);
            }
            None => return Err(self.error_here("unexpected end of file in definition")),
        };

        Ok(Some(sp!(span => Definition { name, body })))
    }

    /// `NAME MACRO ::= BEGIN ... END` — language scaffolding, not a symbol.
    fn skip_macro_body(&mut self) {
        let _ = self.eat_token(&Token::Assign);
        let _ = self.eat_word("BEGIN");
        while let Some(token) = self.next() {
            if token.value.word() == Some("END") {
                break;
            }
        }
    }

    /// Recovery: consume tokens up to and including the next `::=` value so
    /// the loop can resume at the following definition head.
    fn skim_definition(&mut self) {
        loop {
            match self.peek() {
                None => return,
                Some(sp) if sp.value.word() == Some("END") => return,
                Some(sp) if sp.value == Token::Assign => {
                    self.next();
                    self.skip_value();
                    return;
                }
                Some(_) => {
                    self.next();
                }
            }
        }
    }

    /// Consume the value after a `::=`: balanced braces or a single token.
    fn skip_value(&mut self) {
        if self.eat_token(&Token::LBrace) {
            let mut depth = 1usize;
            while depth > 0 {
                match self.next() {
                    None => return,
                    Some(sp) if sp.value == Token::LBrace => depth += 1,
                    Some(sp) if sp.value == Token::RBrace => depth -= 1,
                    Some(_) => {}
                }
            }
        } else {
            self.next();
        }
    }

    // ------------------------------------------------------------------
    // macro invocation bodies

    fn parse_object_type_body(&mut self) -> PResult<ObjectTypeBody> {
        let mut syntax = None;
        let mut units = None;
        let mut access = None;
        let mut status = None;
        let mut description = None;
        let mut reference = None;
        let mut index = Vec::new();
        let mut augments = None;
        let mut defval = None;

        loop {
            let word = self.peek_word().map(|s| s.to_owned());
            match word.as_deref() {
                Some("SYNTAX") => {
                    self.next();
                    syntax = Some(self.parse_syntax()?);
                }
                Some("UNITS") => {
                    self.next();
                    units = Some(self.expect_string()?);
                }
                Some("MAX-ACCESS") | Some("ACCESS") | Some("PIB-ACCESS") => {
                    self.next();
                    access = Some(self.expect_word()?);
                }
                Some("STATUS") => {
                    self.next();
                    status = Some(self.expect_word()?);
                }
                Some("DESCRIPTION") => {
                    self.next();
                    description = Some(self.expect_string()?);
                }
                Some("REFERENCE") => {
                    self.next();
                    reference = Some(self.expect_string()?);
                }
                Some("INDEX") => {
                    self.next();
                    index = self.parse_index_entries()?;
                }
                Some("AUGMENTS") => {
                    self.next();
                    self.expect_token(&Token::LBrace)?;
                    augments = Some(self.expect_ident()?);
                    self.expect_token(&Token::RBrace)?;
                }
                Some("DEFVAL") => {
                    self.next();
                    defval = Some(self.parse_defval()?);
                }
                _ if matches!(self.peek().map(|sp| &sp.value), Some(Token::Assign)) => break,
                _ => return Err(self.error_here("expected OBJECT-TYPE clause or `::=`")),
            }
        }

        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;

        let syntax = match syntax {
            Some(syntax) => syntax,
            None => {
                self.diags.push(ParseDiagnostic::new(oid.span, "OBJECT-TYPE without SYNTAX"));
                sp!(SyntaxAst::OctetString)
            }
        };

        Ok(ObjectTypeBody {
            syntax,
            units,
            access,
            status,
            description,
            reference,
            index,
            augments,
            defval,
            oid,
        })
    }

    fn parse_index_entries(&mut self) -> PResult<Vec<Sp<IndexEntryAst>>> {
        self.expect_token(&Token::LBrace)?;
        let mut entries = Vec::new();
        loop {
            let implied = self.eat_word("IMPLIED");
            let name = self.expect_ident()?;
            entries.push(sp!(name.span => IndexEntryAst { implied, name: name.value }));
            if self.eat_token(&Token::Comma) {
                continue;
            }
            self.expect_token(&Token::RBrace)?;
            break;
        }
        Ok(entries)
    }

    fn parse_module_identity_body(&mut self) -> PResult<ModuleIdentityBody> {
        let mut last_updated = None;
        let mut organization = None;
        let mut contact_info = None;
        let mut description = None;
        let mut revisions = Vec::new();

        loop {
            let word = self.peek_word().map(|s| s.to_owned());
            match word.as_deref() {
                Some("LAST-UPDATED") => {
                    self.next();
                    last_updated = Some(self.expect_string()?);
                }
                Some("ORGANIZATION") => {
                    self.next();
                    organization = Some(self.expect_string()?);
                }
                Some("CONTACT-INFO") => {
                    self.next();
                    contact_info = Some(self.expect_string()?);
                }
                Some("DESCRIPTION") => {
                    self.next();
                    description = Some(self.expect_string()?);
                }
                Some("REVISION") => {
                    self.next();
                    let date = self.expect_string()?;
                    let description = if self.eat_word("DESCRIPTION") {
                        Some(self.expect_string()?)
                    } else {
                        None
                    };
                    revisions.push(RevisionAst { date, description });
                }
                _ if matches!(self.peek().map(|sp| &sp.value), Some(Token::Assign)) => break,
                _ => return Err(self.error_here("expected MODULE-IDENTITY clause or `::=`")),
            }
        }

        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;

        Ok(ModuleIdentityBody {
            last_updated,
            organization,
            contact_info,
            description,
            revisions,
            oid,
        })
    }

    fn parse_object_identity_body(&mut self) -> PResult<ObjectIdentityBody> {
        let (status, description, reference) = self.parse_status_clauses()?;
        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(ObjectIdentityBody { status, description, reference, oid })
    }

    /// The common `STATUS / DESCRIPTION / REFERENCE` tail shared by several
    /// macros.
    fn parse_status_clauses(
        &mut self,
    ) -> PResult<(Option<Sp<String>>, Option<Sp<String>>, Option<Sp<String>>)> {
        let mut status = None;
        let mut description = None;
        let mut reference = None;
        loop {
            match self.peek_word() {
                Some("STATUS") => {
                    self.next();
                    status = Some(self.expect_word()?);
                }
                Some("DESCRIPTION") => {
                    self.next();
                    description = Some(self.expect_string()?);
                }
                Some("REFERENCE") => {
                    self.next();
                    reference = Some(self.expect_string()?);
                }
                _ => break,
            }
        }
        Ok((status, description, reference))
    }

    fn parse_notification_type_body(&mut self) -> PResult<NotificationTypeBody> {
        let mut objects = Vec::new();
        if self.eat_word("OBJECTS") {
            objects = self.parse_ident_list()?;
        }
        let (status, description, reference) = self.parse_status_clauses()?;
        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(NotificationTypeBody { objects, status, description, reference, oid })
    }

    fn parse_trap_type_body(&mut self) -> PResult<TrapTypeBody> {
        self.expect_keyword("ENTERPRISE")?;
        let enterprise = if matches!(self.peek().map(|sp| &sp.value), Some(Token::LBrace)) {
            let oid = self.parse_oid_assignment()?;
            sp!(oid.span => EnterpriseRef::Oid(oid.value))
        } else {
            let name = self.expect_ident()?;
            sp!(name.span => EnterpriseRef::Name(name.value))
        };

        let mut variables = Vec::new();
        let mut description = None;
        let mut reference = None;
        loop {
            match self.peek_word() {
                Some("VARIABLES") => {
                    self.next();
                    variables = self.parse_ident_list()?;
                }
                Some("DESCRIPTION") => {
                    self.next();
                    description = Some(self.expect_string()?);
                }
                Some("REFERENCE") => {
                    self.next();
                    reference = Some(self.expect_string()?);
                }
                _ => break,
            }
        }

        self.expect_token(&Token::Assign)?;
        let number = self.expect_u32()?;
        Ok(TrapTypeBody { enterprise, variables, description, reference, number })
    }

    fn parse_object_group_body(&mut self) -> PResult<ObjectGroupBody> {
        self.expect_keyword("OBJECTS")?;
        let objects = self.parse_ident_list()?;
        let (status, description, reference) = self.parse_status_clauses()?;
        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(ObjectGroupBody { objects, status, description, reference, oid })
    }

    fn parse_notification_group_body(&mut self) -> PResult<NotificationGroupBody> {
        self.expect_keyword("NOTIFICATIONS")?;
        let notifications = self.parse_ident_list()?;
        let (status, description, reference) = self.parse_status_clauses()?;
        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(NotificationGroupBody { notifications, status, description, reference, oid })
    }

    fn parse_module_compliance_body(&mut self) -> PResult<ModuleComplianceBody> {
        let (status, description, reference) = self.parse_status_clauses()?;
        let mut modules = Vec::new();
        while self.at_word("MODULE") {
            self.next();
            modules.push(self.parse_compliance_module()?);
        }
        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(ModuleComplianceBody { status, description, reference, modules, oid })
    }

    fn parse_compliance_module(&mut self) -> PResult<ComplianceModuleAst> {
        // a word that isn't a section keyword is the referenced module's name;
        // `peek_word()` is None both at `::=` and at end of file
        let module = match self.peek_word() {
            Some("MANDATORY-GROUPS") | Some("GROUP") | Some("OBJECT") | Some("MODULE") | None => None,
            Some(_) => Some(self.expect_ident()?),
        };

        let mut mandatory_groups = Vec::new();
        if self.eat_word("MANDATORY-GROUPS") {
            mandatory_groups = self.parse_ident_list()?;
        }

        let mut requirements = Vec::new();
        loop {
            match self.peek_word() {
                Some("GROUP") => {
                    self.next();
                    let name = self.expect_ident()?;
                    let description = if self.eat_word("DESCRIPTION") {
                        Some(self.expect_string()?)
                    } else {
                        None
                    };
                    requirements.push(ComplianceRequirementAst::Group { name, description });
                }
                Some("OBJECT") => {
                    self.next();
                    let name = self.expect_ident()?;
                    let mut syntax = None;
                    let mut write_syntax = None;
                    let mut min_access = None;
                    let mut description = None;
                    loop {
                        match self.peek_word() {
                            Some("SYNTAX") => {
                                self.next();
                                syntax = Some(self.parse_syntax()?);
                            }
                            Some("WRITE-SYNTAX") => {
                                self.next();
                                write_syntax = Some(self.parse_syntax()?);
                            }
                            Some("MIN-ACCESS") => {
                                self.next();
                                min_access = Some(self.expect_word()?);
                            }
                            Some("DESCRIPTION") => {
                                self.next();
                                description = Some(self.expect_string()?);
                            }
                            _ => break,
                        }
                    }
                    requirements.push(ComplianceRequirementAst::Object {
                        name,
                        syntax,
                        write_syntax,
                        min_access,
                        description,
                    });
                }
                _ => break,
            }
        }

        Ok(ComplianceModuleAst { module, mandatory_groups, requirements })
    }

    fn parse_agent_capabilities_body(&mut self) -> PResult<AgentCapabilitiesBody> {
        let mut product_release = None;
        let mut status = None;
        let mut description = None;
        let mut reference = None;
        loop {
            match self.peek_word() {
                Some("PRODUCT-RELEASE") => {
                    self.next();
                    product_release = Some(self.expect_string()?);
                }
                Some("STATUS") => {
                    self.next();
                    status = Some(self.expect_word()?);
                }
                Some("DESCRIPTION") => {
                    self.next();
                    description = Some(self.expect_string()?);
                }
                Some("REFERENCE") => {
                    self.next();
                    reference = Some(self.expect_string()?);
                }
                _ => break,
            }
        }

        let mut supports = Vec::new();
        while self.at_word("SUPPORTS") {
            self.next();
            supports.push(self.parse_supports()?);
        }

        self.expect_token(&Token::Assign)?;
        let oid = self.parse_oid_assignment()?;
        Ok(AgentCapabilitiesBody { product_release, status, description, reference, supports, oid })
    }

    fn parse_supports(&mut self) -> PResult<SupportsAst> {
        let module = self.expect_ident()?;
        self.expect_keyword("INCLUDES")?;
        let includes = self.parse_ident_list()?;
        let mut variations = Vec::new();
        while self.at_word("VARIATION") {
            self.next();
            let name = self.expect_ident()?;
            let mut syntax = None;
            let mut write_syntax = None;
            let mut access = None;
            let mut creation_requires = Vec::new();
            let mut defval = None;
            let mut description = None;
            loop {
                match self.peek_word() {
                    Some("SYNTAX") => {
                        self.next();
                        syntax = Some(self.parse_syntax()?);
                    }
                    Some("WRITE-SYNTAX") => {
                        self.next();
                        write_syntax = Some(self.parse_syntax()?);
                    }
                    Some("ACCESS") => {
                        self.next();
                        access = Some(self.expect_word()?);
                    }
                    Some("CREATION-REQUIRES") => {
                        self.next();
                        creation_requires = self.parse_ident_list()?;
                    }
                    Some("DEFVAL") => {
                        self.next();
                        defval = Some(self.parse_defval()?);
                    }
                    Some("DESCRIPTION") => {
                        self.next();
                        description = Some(self.expect_string()?);
                    }
                    _ => break,
                }
            }
            variations.push(VariationAst {
                name,
                syntax,
                write_syntax,
                access,
                creation_requires,
                defval,
                description,
            });
        }
        Ok(SupportsAst { module, includes, variations })
    }

    fn parse_type_assignment_body(&mut self) -> PResult<TypeAssignmentBody> {
        if self.eat_word("TEXTUAL-CONVENTION") {
            let mut display_hint = None;
            let mut status = None;
            let mut description = None;
            let mut reference = None;
            let mut syntax = None;
            loop {
                match self.peek_word() {
                    Some("DISPLAY-HINT") => {
                        self.next();
                        display_hint = Some(self.expect_string()?);
                    }
                    Some("STATUS") => {
                        self.next();
                        status = Some(self.expect_word()?);
                    }
                    Some("DESCRIPTION") => {
                        self.next();
                        description = Some(self.expect_string()?);
                    }
                    Some("REFERENCE") => {
                        self.next();
                        reference = Some(self.expect_string()?);
                    }
                    Some("SYNTAX") => {
                        self.next();
                        syntax = Some(self.parse_syntax()?);
                        break;
                    }
                    _ => return Err(self.error_here("expected TEXTUAL-CONVENTION clause")),
                }
            }
            let syntax = match syntax {
                Some(syntax) => syntax,
                None => return Err(self.error_here("TEXTUAL-CONVENTION without SYNTAX")),
            };
            Ok(TypeAssignmentBody {
                is_textual_convention: true,
                display_hint,
                status,
                description,
                reference,
                syntax,
            })
        } else {
            let syntax = self.parse_syntax()?;
            Ok(TypeAssignmentBody {
                is_textual_convention: false,
                display_hint: None,
                status: None,
                description: None,
                reference: None,
                syntax,
            })
        }
    }

    // ------------------------------------------------------------------
    // type syntax

    fn parse_syntax(&mut self) -> PResult<Sp<SyntaxAst>> {
        let start = match self.peek() {
            Some(sp) => sp.span,
            None => return Err(self.error_here("expected type syntax, found end of file")),
        };

        let base: Sp<SyntaxAst> = match self.peek().map(|sp| sp.value.clone()) {
            Some(Token::LBracket) => {
                // ASN.1 tag, e.g. `[APPLICATION 4] IMPLICIT ...`; only the
                // base modules use these and the tag itself carries nothing
                // the resolver needs
                while let Some(token) = self.next() {
                    if token.value == Token::RBracket {
                        break;
                    }
                }
                let _ = self.eat_word("IMPLICIT") || self.eat_word("EXPLICIT");
                self.parse_syntax()?
            }
            Some(Token::Word(word)) => match word.as_str() {
                "INTEGER" | "Integer" => {
                    self.next();
                    if matches!(self.peek().map(|sp| &sp.value), Some(Token::LBrace)) {
                        let named_numbers = self.parse_named_numbers()?;
                        sp!(start.merge(self.last_span) => SyntaxAst::IntegerEnum { named_numbers })
                    } else {
                        let name = sp!(start => Ident::new_unchecked("INTEGER"));
                        sp!(start => SyntaxAst::TypeRef { name, named_numbers: None })
                    }
                }
                "OCTET" => {
                    self.next();
                    self.expect_keyword("STRING")?;
                    sp!(start.merge(self.last_span) => SyntaxAst::OctetString)
                }
                "OBJECT" => {
                    self.next();
                    self.expect_keyword("IDENTIFIER")?;
                    sp!(start.merge(self.last_span) => SyntaxAst::ObjectIdentifier)
                }
                "BITS" => {
                    self.next();
                    let named_bits = if matches!(self.peek().map(|sp| &sp.value), Some(Token::LBrace)) {
                        self.parse_named_numbers()?
                    } else {
                        Vec::new()
                    };
                    sp!(start.merge(self.last_span) => SyntaxAst::Bits { named_bits })
                }
                "SEQUENCE" => {
                    self.next();
                    if self.eat_word("OF") {
                        let entry = self.expect_ident()?;
                        sp!(start.merge(entry.span) => SyntaxAst::SequenceOf { entry })
                    } else {
                        let fields = self.parse_field_list()?;
                        sp!(start.merge(self.last_span) => SyntaxAst::Sequence { fields })
                    }
                }
                "CHOICE" => {
                    self.next();
                    let alternatives = self.parse_field_list()?;
                    sp!(start.merge(self.last_span) => SyntaxAst::Choice { alternatives })
                }
                _ => {
                    let name = self.expect_ident()?;
                    let named_numbers = if matches!(self.peek().map(|sp| &sp.value), Some(Token::LBrace)) {
                        Some(self.parse_named_numbers()?)
                    } else {
                        None
                    };
                    sp!(start.merge(self.last_span) => SyntaxAst::TypeRef { name, named_numbers })
                }
            },
            Some(other) => {
                let descr = other.descr();
                return Err(self.error_here(format!("expected type syntax, found {descr}")));
            }
            None => return Err(self.error_here("expected type syntax, found end of file")),
        };

        if matches!(self.peek().map(|sp| &sp.value), Some(Token::LParen)) {
            let constraint = self.parse_constraint()?;
            let span = start.merge(self.last_span);
            return Ok(sp!(span => SyntaxAst::Constrained { base: Box::new(base), constraint }));
        }
        Ok(base)
    }

    fn parse_field_list(&mut self) -> PResult<Vec<SequenceFieldAst>> {
        self.expect_token(&Token::LBrace)?;
        let mut fields = Vec::new();
        if self.eat_token(&Token::RBrace) {
            return Ok(fields);
        }
        loop {
            let name = self.expect_ident()?;
            let syntax = self.parse_syntax()?;
            fields.push(SequenceFieldAst { name, syntax });
            if self.eat_token(&Token::Comma) {
                continue;
            }
            self.expect_token(&Token::RBrace)?;
            break;
        }
        Ok(fields)
    }

    fn parse_named_numbers(&mut self) -> PResult<Vec<Sp<NamedNumberAst>>> {
        self.expect_token(&Token::LBrace)?;
        let mut named = Vec::new();
        if self.eat_token(&Token::RBrace) {
            return Ok(named);
        }
        loop {
            let name = self.expect_ident()?;
            self.expect_token(&Token::LParen)?;
            let negative = self.eat_token(&Token::Minus);
            let number = self.expect_u32()?;
            let value = if negative { -(number.value as i64) } else { number.value as i64 };
            self.expect_token(&Token::RParen)?;
            let span = name.span.merge(self.last_span);
            named.push(sp!(span => NamedNumberAst { name, value }));
            if self.eat_token(&Token::Comma) {
                continue;
            }
            self.expect_token(&Token::RBrace)?;
            break;
        }
        Ok(named)
    }

    fn parse_constraint(&mut self) -> PResult<Sp<ConstraintAst>> {
        let start = self.expect_token(&Token::LParen)?;
        let constraint = if self.at_word("SIZE") {
            self.next();
            self.expect_token(&Token::LParen)?;
            let ranges = self.parse_ranges()?;
            self.expect_token(&Token::RParen)?;
            ConstraintAst::Size(ranges)
        } else {
            ConstraintAst::Range(self.parse_ranges()?)
        };
        self.expect_token(&Token::RParen)?;
        Ok(sp!(start.merge(self.last_span) => constraint))
    }

    fn parse_ranges(&mut self) -> PResult<Vec<RangeAst>> {
        let mut ranges = Vec::new();
        loop {
            let low = self.parse_range_endpoint()?;
            let high = if self.eat_token(&Token::DotDot) {
                Some(self.parse_range_endpoint()?)
            } else {
                None
            };
            ranges.push(RangeAst { low, high });
            if self.eat_token(&Token::Pipe) {
                continue;
            }
            break;
        }
        Ok(ranges)
    }

    fn parse_range_endpoint(&mut self) -> PResult<Sp<RangeEndpointAst>> {
        match self.next() {
            Some(sp) => {
                let span = sp.span;
                match sp.value {
                    Token::Number(n) => {
                        if n > i64::MAX as u64 {
                            Ok(sp!(span => RangeEndpointAst::Unsigned(n)))
                        } else {
                            Ok(sp!(span => RangeEndpointAst::Signed(n as i64)))
                        }
                    }
                    Token::Minus => {
                        let n = self.expect_u32()?;
                        Ok(sp!(span.merge(n.span) => RangeEndpointAst::Signed(-(n.value as i64))))
                    }
                    Token::Word(w) if w == "MIN" => Ok(sp!(span => RangeEndpointAst::Min)),
                    Token::Word(w) if w == "MAX" => Ok(sp!(span => RangeEndpointAst::Max)),
                    Token::HexStr(digits) => {
                        let value = u64::from_str_radix(&digits, 16).unwrap_or(0);
                        Ok(sp!(span => RangeEndpointAst::Unsigned(value)))
                    }
                    Token::BinStr(digits) => {
                        let value = u64::from_str_radix(&digits, 2).unwrap_or(0);
                        Ok(sp!(span => RangeEndpointAst::Unsigned(value)))
                    }
                    other => {
                        let descr = other.descr();
                        Err(self.error_at(span, format!("expected range endpoint, found {descr}")))
                    }
                }
            }
            None => Err(self.error_here("expected range endpoint, found end of file")),
        }
    }

    // ------------------------------------------------------------------
    // OID assignments, ident lists, DEFVALs

    fn parse_ident_list(&mut self) -> PResult<Vec<Sp<Ident>>> {
        self.expect_token(&Token::LBrace)?;
        let mut idents = Vec::new();
        if self.eat_token(&Token::RBrace) {
            return Ok(idents);
        }
        loop {
            idents.push(self.expect_ident()?);
            if self.eat_token(&Token::Comma) {
                continue;
            }
            self.expect_token(&Token::RBrace)?;
            break;
        }
        Ok(idents)
    }

    fn parse_oid_assignment(&mut self) -> PResult<Sp<OidAst>> {
        let start = self.expect_token(&Token::LBrace)?;
        let mut components = Vec::new();
        loop {
            match self.peek().map(|sp| sp.value.clone()) {
                Some(Token::RBrace) => {
                    self.next();
                    break;
                }
                Some(Token::Number(_)) => {
                    let number = self.expect_u32()?;
                    components.push(sp!(number.span => OidComponentAst::Number(number.value)));
                }
                Some(Token::Word(_)) => {
                    components.push(self.parse_oid_name_component()?);
                }
                Some(other) => {
                    let descr = other.descr();
                    return Err(self.error_here(format!("expected OID component, found {descr}")));
                }
                None => return Err(self.error_here("unterminated OID assignment")),
            }
        }
        if components.is_empty() {
            self.error_at(start, "empty OID assignment");
        }
        Ok(sp!(start.merge(self.last_span) => OidAst { components }))
    }

    /// `name`, `name(3)`, `Module.name`, or `Module.name(3)`.
    fn parse_oid_name_component(&mut self) -> PResult<Sp<OidComponentAst>> {
        let first = self.expect_ident()?;
        let start = first.span;
        let (module, name) = if self.eat_token(&Token::Dot) {
            let name = self.expect_ident()?;
            (Some(first.value), name.value)
        } else {
            (None, first.value)
        };
        let number = if self.eat_token(&Token::LParen) {
            let number = self.expect_u32()?;
            self.expect_token(&Token::RParen)?;
            Some(number.value)
        } else {
            None
        };
        let span = start.merge(self.last_span);
        let component = match (module, number) {
            (None, None) => OidComponentAst::Name(name),
            (None, Some(n)) => OidComponentAst::NamedNumber(name, n),
            (Some(m), None) => OidComponentAst::QualifiedName(m, name),
            (Some(m), Some(n)) => OidComponentAst::QualifiedNamedNumber(m, name, n),
        };
        Ok(sp!(span => component))
    }

    fn parse_defval(&mut self) -> PResult<Sp<DefValAst>> {
        let start = self.expect_token(&Token::LBrace)?;
        let value = match self.peek().map(|sp| sp.value.clone()) {
            Some(Token::Number(n)) => {
                self.next();
                if n > i64::MAX as u64 {
                    DefValAst::Unsigned(n)
                } else {
                    DefValAst::Integer(n as i64)
                }
            }
            Some(Token::Minus) => {
                self.next();
                let n = self.expect_u32()?;
                DefValAst::Integer(-(n.value as i64))
            }
            Some(Token::Str(s)) => {
                self.next();
                DefValAst::Str(s)
            }
            Some(Token::HexStr(s)) => {
                self.next();
                DefValAst::Hex(s)
            }
            Some(Token::BinStr(s)) => {
                self.next();
                DefValAst::Bin(s)
            }
            Some(Token::Word(_)) => {
                let ident = self.expect_ident()?;
                DefValAst::Ident(ident.value)
            }
            Some(Token::LBrace) => self.parse_defval_braces()?,
            _ => {
                self.error_here("unrecognized DEFVAL; skipping");
                self.skip_to_defval_end();
                return Ok(sp!(start.merge(self.last_span) => DefValAst::Unparsed));
            }
        };
        self.expect_token(&Token::RBrace)?;
        Ok(sp!(start.merge(self.last_span) => value))
    }

    /// Inner braces in a DEFVAL: a BITS label list (comma-separated) or an
    /// explicit OID value (whitespace-separated components).
    fn parse_defval_braces(&mut self) -> PResult<DefValAst> {
        self.expect_token(&Token::LBrace)?;
        if self.eat_token(&Token::RBrace) {
            return Ok(DefValAst::Bits(Vec::new()));
        }

        let mut components = Vec::new();
        match self.peek().map(|sp| sp.value.clone()) {
            Some(Token::Number(_)) => {
                let number = self.expect_u32()?;
                components.push(sp!(number.span => OidComponentAst::Number(number.value)));
            }
            Some(Token::Word(_)) => {
                components.push(self.parse_oid_name_component()?);
            }
            _ => {
                self.error_here("unrecognized DEFVAL value");
                self.skip_to_defval_end();
                return Ok(DefValAst::Unparsed);
            }
        }

        if self.eat_token(&Token::Comma) {
            // BITS label list
            let mut labels: Vec<Sp<Ident>> = Vec::new();
            match &components[0].value {
                OidComponentAst::Name(name) => {
                    labels.push(sp!(components[0].span => name.clone()));
                }
                _ => {
                    self.error_at(components[0].span, "expected BITS label");
                }
            }
            loop {
                labels.push(self.expect_ident()?);
                if self.eat_token(&Token::Comma) {
                    continue;
                }
                self.expect_token(&Token::RBrace)?;
                break;
            }
            return Ok(DefValAst::Bits(labels));
        }

        loop {
            match self.peek().map(|sp| sp.value.clone()) {
                Some(Token::RBrace) => {
                    self.next();
                    break;
                }
                Some(Token::Number(_)) => {
                    let number = self.expect_u32()?;
                    components.push(sp!(number.span => OidComponentAst::Number(number.value)));
                }
                Some(Token::Word(_)) => {
                    components.push(self.parse_oid_name_component()?);
                }
                _ => {
                    self.error_here("unterminated OID value in DEFVAL");
                    self.skip_to_defval_end();
                    return Ok(DefValAst::Unparsed);
                }
            }
        }
        Ok(DefValAst::OidValue(components))
    }

    /// Consume up to the closing brace of a DEFVAL whose contents we gave up on.
    fn skip_to_defval_end(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next() {
                None => return,
                Some(sp) if sp.value == Token::LBrace => depth += 1,
                Some(sp) if sp.value == Token::RBrace => depth -= 1,
                Some(_) => {}
            }
        }
        // leave the final RBrace consumed; parse_defval's caller continues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Root {
        let (root, diags) = parse_file(None, source.as_bytes());
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        root
    }

    #[test]
    fn minimal_module() {
        let root = parse_ok("TEST-MIB DEFINITIONS ::= BEGIN END");
        assert_eq!(root.modules.len(), 1);
        assert_eq!(root.modules[0].name.value, "TEST-MIB");
        assert!(root.modules[0].definitions.is_empty());
    }

    #[test]
    fn imports_flatten_later() {
        let root = parse_ok(
            "TEST-MIB DEFINITIONS ::= BEGIN
             IMPORTS
                 OBJECT-TYPE, Integer32 FROM SNMPv2-SMI
                 DisplayString FROM SNMPv2-TC;
             END",
        );
        let module = &root.modules[0].value;
        assert_eq!(module.imports.len(), 2);
        assert_eq!(module.imports[0].symbols.len(), 2);
        assert_eq!(module.imports[0].module.value, "SNMPv2-SMI");
        assert_eq!(module.imports[1].symbols[0].value, "DisplayString");
    }

    #[test]
    fn object_type_with_clauses() {
        let root = parse_ok(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            foo OBJECT-TYPE
                SYNTAX      Integer32 (0..100)
                UNITS       "seconds"
                MAX-ACCESS  read-only
                STATUS      current
                DESCRIPTION "A thing."
                ::= { bar 1 }
            END"#,
        );
        let module = &root.modules[0].value;
        assert_eq!(module.definitions.len(), 1);
        let def = &module.definitions[0].value;
        assert_eq!(def.name.value, "foo");
        let body = match &def.body {
            DefBody::ObjectType(body) => body,
            other => panic!("wrong body: {other:?}"),
        };
        assert_eq!(body.access.as_ref().unwrap().value, "read-only");
        assert_eq!(body.units.as_ref().unwrap().value, "seconds");
        assert!(matches!(body.syntax.value, SyntaxAst::Constrained { .. }));
        assert_eq!(body.oid.components.len(), 2);
    }

    #[test]
    fn value_assignment_and_named_numbers() {
        let root = parse_ok(
            "TEST-MIB DEFINITIONS ::= BEGIN
             internet OBJECT IDENTIFIER ::= { iso org(3) dod(6) 1 }
             END",
        );
        let def = &root.modules[0].definitions[0].value;
        let oid = match &def.body {
            DefBody::ValueAssignment(body) => &body.oid,
            other => panic!("wrong body: {other:?}"),
        };
        assert_eq!(oid.components.len(), 4);
        assert!(matches!(oid.components[0].value, OidComponentAst::Name(_)));
        assert!(matches!(oid.components[1].value, OidComponentAst::NamedNumber(_, 3)));
        assert!(matches!(oid.components[3].value, OidComponentAst::Number(1)));
    }

    #[test]
    fn textual_convention() {
        let root = parse_ok(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            MyString ::= TEXTUAL-CONVENTION
                DISPLAY-HINT "255a"
                STATUS       current
                DESCRIPTION  "text"
                SYNTAX       OCTET STRING (SIZE (0..255))
            END"#,
        );
        let def = &root.modules[0].definitions[0].value;
        let body = match &def.body {
            DefBody::TypeAssignment(body) => body,
            other => panic!("wrong body: {other:?}"),
        };
        assert!(body.is_textual_convention);
        assert_eq!(body.display_hint.as_ref().unwrap().value, "255a");
        match &body.syntax.value {
            SyntaxAst::Constrained { base, constraint } => {
                assert!(matches!(base.value, SyntaxAst::OctetString));
                assert!(matches!(constraint.value, ConstraintAst::Size(_)));
            }
            other => panic!("wrong syntax: {other:?}"),
        }
    }

    #[test]
    fn trap_type() {
        let root = parse_ok(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            coldStart TRAP-TYPE
                ENTERPRISE snmp
                VARIABLES { sysUpTime }
                DESCRIPTION "restart"
                ::= 0
            END"#,
        );
        let def = &root.modules[0].definitions[0].value;
        let body = match &def.body {
            DefBody::TrapType(body) => body,
            other => panic!("wrong body: {other:?}"),
        };
        assert!(matches!(body.enterprise.value, EnterpriseRef::Name(_)));
        assert_eq!(body.number.value, 0);
        assert_eq!(body.variables.len(), 1);
    }

    #[test]
    fn macro_bodies_are_skipped() {
        let root = parse_ok(
            "TEST-MIB DEFINITIONS ::= BEGIN
             OBJECT-TYPE MACRO ::= BEGIN
                 TYPE NOTATION ::= whatever
             END
             foo OBJECT IDENTIFIER ::= { bar 1 }
             END",
        );
        assert_eq!(root.modules[0].definitions.len(), 1);
    }

    #[test]
    fn broken_definition_recovers() {
        let (root, diags) = parse_file(
            None,
            b"TEST-MIB DEFINITIONS ::= BEGIN
              broken OBJECT-TYPE SYNTAX ::= { a 1 }
              good OBJECT IDENTIFIER ::= { iso 1 }
              END",
        );
        assert!(!diags.is_empty());
        let module = &root.modules[0];
        assert_eq!(module.definitions.len(), 1);
        assert_eq!(module.definitions[0].name.value, "good");
    }

    #[test]
    fn sequence_and_choice() {
        let root = parse_ok(
            "TEST-MIB DEFINITIONS ::= BEGIN
             IfEntry ::= SEQUENCE { ifIndex INTEGER, ifDescr OCTET STRING }
             NetworkAddress ::= CHOICE { internet IpAddress }
             END",
        );
        let defs = &root.modules[0].definitions;
        match &defs[0].body {
            DefBody::TypeAssignment(body) => match &body.syntax.value {
                SyntaxAst::Sequence { fields } => assert_eq!(fields.len(), 2),
                other => panic!("wrong syntax: {other:?}"),
            },
            other => panic!("wrong body: {other:?}"),
        }
        match &defs[1].body {
            DefBody::TypeAssignment(body) => match &body.syntax.value {
                SyntaxAst::Choice { alternatives } => assert_eq!(alternatives.len(), 1),
                other => panic!("wrong syntax: {other:?}"),
            },
            other => panic!("wrong body: {other:?}"),
        }
    }

    #[test]
    fn defval_variants() {
        let root = parse_ok(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            a OBJECT-TYPE SYNTAX INTEGER MAX-ACCESS read-only STATUS current
              DEFVAL { 5 } ::= { x 1 }
            b OBJECT-TYPE SYNTAX INTEGER MAX-ACCESS read-only STATUS current
              DEFVAL { active } ::= { x 2 }
            c OBJECT-TYPE SYNTAX BITS { one(0), two(1) } MAX-ACCESS read-only STATUS current
              DEFVAL { { one, two } } ::= { x 3 }
            d OBJECT-TYPE SYNTAX OBJECT IDENTIFIER MAX-ACCESS read-only STATUS current
              DEFVAL { { 0 0 } } ::= { x 4 }
            e OBJECT-TYPE SYNTAX OCTET STRING MAX-ACCESS read-only STATUS current
              DEFVAL { 'ff00'H } ::= { x 5 }
            END"#,
        );
        let defs = &root.modules[0].definitions;
        fn defval(defs: &[Sp<Definition>], i: usize) -> &DefValAst {
            match &defs[i].body {
                DefBody::ObjectType(body) => &body.defval.as_ref().unwrap().value,
                other => panic!("wrong body: {other:?}"),
            }
        }
        assert_eq!(defval(defs, 0), &DefValAst::Integer(5));
        assert!(matches!(defval(defs, 1), DefValAst::Ident(_)));
        assert!(matches!(defval(defs, 2), DefValAst::Bits(labels) if labels.len() == 2));
        assert!(matches!(defval(defs, 3), DefValAst::OidValue(comps) if comps.len() == 2));
        assert_eq!(defval(defs, 4), &DefValAst::Hex("ff00".into()));
    }

    #[test]
    fn module_identity_revisions() {
        let root = parse_ok(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            testMIB MODULE-IDENTITY
                LAST-UPDATED "202401010000Z"
                ORGANIZATION "org"
                CONTACT-INFO "contact"
                DESCRIPTION  "desc"
                REVISION     "202401010000Z"
                DESCRIPTION  "initial"
                ::= { enterprises 1 }
            END"#,
        );
        let body = match &root.modules[0].definitions[0].body {
            DefBody::ModuleIdentity(body) => body.clone(),
            other => panic!("wrong body: {other:?}"),
        };
        assert_eq!(body.last_updated.unwrap().value, "202401010000Z");
        assert_eq!(body.revisions.len(), 1);
    }
}
