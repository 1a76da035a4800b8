use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jt_core::{Insertion, TreeOpts};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "jt",
    about = "Query and edit labelled-array JSON trees by node id",
    version
)]
struct Cli {
    /// Path segment delimiter
    #[arg(long, global = true, default_value_t = '.')]
    delimiter: char,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the flattened path map
    Flatten(FlattenArgs),
    /// Print the parent id (empty for the topmost ancestor)
    Parent(IdArgs),
    /// List descendant ids in pre-order
    Children(ChildrenArgs),
    /// List sibling ids
    Siblings(SiblingArgs),
    /// Print the first child id
    FirstChild(IdArgs),
    /// Print whether the node has children
    HasChildren(IdArgs),
    /// Print whether the node is the first child of its parent
    IsFirst(IdArgs),
    /// Print whether the node is the last child of its parent
    IsLast(IdArgs),
    /// Print the topmost ancestor id
    Root(FileArgs),
    /// Insert a branch next to or inside a node; prints or writes with --out
    Insert(InsertArgs),
    /// Remove a node and its subtree; prints or writes with --out
    Remove(RemoveArgs),
}

#[derive(ClapArgs, Debug)]
struct FileArgs {
    /// Document to load (.json)
    path: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct FlattenArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Only emit nodes without children
    #[arg(long, default_value_t = false)]
    leaves: bool,
}

#[derive(ClapArgs, Debug)]
struct IdArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Node id
    #[arg(long)]
    id: String,
}

#[derive(ClapArgs, Debug)]
struct ChildrenArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Node id
    #[arg(long)]
    id: String,
    /// Direct children only
    #[arg(long, default_value_t = false)]
    direct: bool,
    /// Print the raw child array instead of ids
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Which {
    All,
    Younger,
    Elder,
    Next,
    Paths,
}

#[derive(ClapArgs, Debug)]
struct SiblingArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Node id
    #[arg(long)]
    id: String,
    #[arg(long, value_enum, default_value_t = Which::All)]
    which: Which,
}

#[derive(ClapArgs, Debug)]
struct InsertArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Node id to insert next to or into
    #[arg(long)]
    id: String,
    /// Branch as raw JSON, e.g. {"w":[]}
    #[arg(long)]
    branch: String,
    /// before, after, insideBeginning or insideEnd
    #[arg(long, default_value = "after")]
    at: String,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct RemoveArgs {
    /// Document to load (.json)
    path: PathBuf,
    /// Node id
    #[arg(long)]
    id: String,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jt_core=warn")),
        )
        .init();

    let cli = Cli::parse();
    let opts = TreeOpts::with_delimiter(cli.delimiter);
    match cli.cmd {
        Cmd::Flatten(a) => cmd_flatten(a, &opts),
        Cmd::Parent(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::parent_id(&doc, &a.id, &opts)));
        }
        Cmd::Children(a) => cmd_children(a, &opts),
        Cmd::Siblings(a) => cmd_siblings(a, &opts),
        Cmd::FirstChild(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::first_child_id(&doc, &a.id, &opts)));
        }
        Cmd::HasChildren(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::has_children(&doc, &a.id, &opts)));
        }
        Cmd::IsFirst(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::is_first_child(&doc, &a.id, &opts)));
        }
        Cmd::IsLast(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::is_last_child(&doc, &a.id, &opts)));
        }
        Cmd::Root(a) => {
            let doc = load(&a.path);
            println!("{}", query(jt_core::topmost_ancestor_id(&doc)));
        }
        Cmd::Insert(a) => cmd_insert(a, &opts),
        Cmd::Remove(a) => cmd_remove(a, &opts),
    }
}

fn load(path: &std::path::Path) -> String {
    jt_core::load_document(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn query<T>(res: Result<T, jt_core::TreeError>) -> T {
    res.unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(3);
    })
}

fn cmd_flatten(args: FlattenArgs, opts: &TreeOpts) {
    let doc = load(&args.path);
    let flat = if args.leaves {
        jt_core::parse_document(&doc).and_then(|v| jt_core::flatten_leaves(&v, opts))
    } else {
        jt_core::parse_document(&doc).and_then(|v| jt_core::flatten(&v, opts))
    };
    let flat = query(flat);
    println!("{}", serde_json::Value::Object(flat));
}

fn cmd_children(args: ChildrenArgs, opts: &TreeOpts) {
    let doc = load(&args.path);
    if args.json {
        println!("{}", query(jt_core::children_json(&doc, &args.id, opts)));
        return;
    }
    for id in query(jt_core::descendant_ids(&doc, &args.id, args.direct, opts)) {
        println!("{}", id);
    }
}

fn cmd_siblings(args: SiblingArgs, opts: &TreeOpts) {
    let doc = load(&args.path);
    let lines = match args.which {
        Which::All => query(jt_core::all_sibling_ids(&doc, &args.id, opts)),
        Which::Younger => query(jt_core::younger_sibling_ids(&doc, &args.id, opts)),
        Which::Paths => query(jt_core::sibling_element_paths(&doc, &args.id, opts)),
        Which::Elder => vec![query(jt_core::elder_sibling_id(&doc, &args.id, opts))],
        Which::Next => vec![query(jt_core::next_younger_sibling_id(&doc, &args.id, opts))],
    };
    for line in lines.iter().filter(|l| !l.is_empty()) {
        println!("{}", line);
    }
}

fn emit(result: Result<String, jt_core::EditError>, out: Option<PathBuf>) {
    let doc = result.unwrap_or_else(|e| {
        println!("{}", e.payload());
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    if let Some(out) = out {
        jt_core::write_document(&out, &doc).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
        tracing::info!("wrote {}", out.display());
    } else {
        println!("{}", doc);
    }
}

fn cmd_insert(args: InsertArgs, opts: &TreeOpts) {
    let insertion: Insertion = args.at.parse().unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(3);
    });
    let doc = load(&args.path);
    emit(
        jt_core::insert(&doc, &args.id, &args.branch, insertion, opts),
        args.out,
    );
}

fn cmd_remove(args: RemoveArgs, opts: &TreeOpts) {
    let doc = load(&args.path);
    emit(jt_core::remove_by_id(&doc, &args.id, opts), args.out);
}
