use std::env;
use std::process::ExitCode;

use anyhow::Context;
use getopts::Options;

use rmib::loader::{LoadOptions, Loader};
use rmib::mib::{Mib, Node};
use rmib::Strictness;

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {program} [options] PATH...");
    print!("{}", opts.usage(&brief));
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optmulti("p", "path", "directory or file to load (repeatable)", "PATH");
    opts.optmulti("m", "module", "restrict to a module and its imports (repeatable)", "MODULE");
    opts.optopt(
        "s",
        "strictness",
        "diagnostic strictness: silent, permissive, normal, strict",
        "LEVEL",
    );
    opts.optflag("", "system-paths", "also scan OS-standard MIB directories");
    opts.optflag("t", "tree", "dump the resolved OID tree");
    opts.optflag("o", "objects", "list resolved objects");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{err}");
            print_usage(&program, &opts);
            return ExitCode::FAILURE;
        }
    };
    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return ExitCode::SUCCESS;
    }

    match run(&matches) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &getopts::Matches) -> anyhow::Result<bool> {
    let strictness: Strictness = match matches.opt_str("strictness") {
        Some(level) => level
            .parse()
            .ok()
            .with_context(|| format!("unknown strictness `{level}`"))?,
        None => Strictness::default(),
    };

    let mut options = LoadOptions::new().strictness(strictness);
    for path in matches.opt_strs("path").into_iter().chain(matches.free.iter().cloned()) {
        options = options.path(path);
    }
    let module_filter = matches.opt_strs("module");
    if !module_filter.is_empty() {
        options = options.modules(module_filter);
    }
    if matches.opt_present("system-paths") {
        options = options.system_paths();
    }

    let mut loader = Loader::with_options(options);
    let mib = loader.load().context("load failed")?;

    render_parse_diagnostics(&loader);

    for diag in mib.diagnostics() {
        eprintln!("{diag}");
    }
    for unresolved in mib.unresolved() {
        eprintln!(
            "unresolved {} `{}` in {}",
            unresolved.kind, unresolved.symbol, unresolved.module
        );
    }

    println!(
        "{} modules, {} objects, {} types, {} notifications, {} nodes",
        mib.module_count(),
        mib.object_count(),
        mib.type_count(),
        mib.notification_count(),
        mib.node_count(),
    );
    let counts = mib.severity_counts();
    let tally: Vec<String> = counts
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(severity, count)| format!("{count} {severity}"))
        .collect();
    if !tally.is_empty() {
        println!("diagnostics: {}", tally.join(", "));
    }

    if matches.opt_present("tree") {
        for root in mib.roots() {
            print_subtree(&mib, root, 0);
        }
    }

    if matches.opt_present("objects") {
        for object in mib.objects() {
            let module = mib.module_by_id(object.module);
            let type_name = object
                .type_name
                .as_ref()
                .map(|name| name.to_string())
                .unwrap_or_else(|| "-".to_owned());
            println!(
                "{}::{} {} {} {} {}",
                module.name, object.name, object.oid, object.kind, object.access, type_name
            );
        }
    }

    Ok(mib.has_errors())
}

fn render_parse_diagnostics(loader: &Loader) {
    use codespan_reporting::term::{self, termcolor as tc};

    if loader.parse_diagnostics().is_empty() {
        return;
    }
    let writer = tc::StandardStream::stderr(tc::ColorChoice::Auto);
    let config = {
        let mut config = term::Config::default();
        // closer to rustc's look; fewer colors overall
        config.styles.primary_label_error.set_intense(true);
        config.styles.secondary_label.set_intense(true);
        config.styles.line_number.set_intense(true);
        config.styles.source_border.set_intense(true);
        config
    };
    for diag in loader.parse_diagnostics() {
        let rendered = diag.to_codespan();
        let _ = term::emit(&mut writer.lock(), &config, loader.source_map(), &rendered);
    }
}

fn print_subtree(mib: &Mib, node: &Node, depth: usize) {
    let label = node
        .name
        .as_ref()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "?".to_owned());
    let module = node
        .module
        .map(|id| mib.module_by_id(id).name.to_string())
        .unwrap_or_default();
    println!(
        "{:indent$}{} {} ({}{}{})",
        "",
        node.oid,
        label,
        node.kind,
        if module.is_empty() { "" } else { ", " },
        module,
        indent = depth * 2,
    );
    for &child in &node.children {
        print_subtree(mib, mib.node(child), depth + 1);
    }
}
