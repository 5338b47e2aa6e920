//! Source files of the loaded binary and their disassembly.

use crate::model::SourceFile;
use crate::store::keys::{
    CachedSourceFiles, DisassemblyForMissingFile, FetchingSourceFiles, SourceFilePaths,
};
use crate::store::Store;
use itertools::Itertools;

/// Single disassembled instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsmLine {
    /// Source line the instruction belongs to, if known.
    pub line: Option<u64>,
    pub text: String,
}

/// Drop disassembly of every known file, keeping the files themselves.
pub fn invalidate_assembly(store: &mut impl Store) {
    store.set::<DisassemblyForMissingFile>(vec![]);
    store.update::<CachedSourceFiles, _>(|files| {
        files.iter_mut().for_each(|file| file.assembly.clear());
    });
    log::debug!(target: "cache", "assembly cache invalidated");
}

/// Forget the source file list of a previously loaded binary.
pub fn clear_source_files(store: &mut impl Store) {
    store.set::<SourceFilePaths>(vec![]);
    store.set::<FetchingSourceFiles>(false);
}

/// Mark the source file list as being fetched.
pub fn begin_source_files_fetch(store: &mut impl Store) {
    store.set::<FetchingSourceFiles>(true);
}

/// Set the source file list received from the debugger, duplicates are removed.
pub fn set_source_file_paths(store: &mut impl Store, paths: Vec<String>) {
    let paths = paths.into_iter().unique().sorted().collect();
    store.set::<SourceFilePaths>(paths);
    store.set::<FetchingSourceFiles>(false);
}

/// Put a file into the cache, an already cached file with the same name is replaced.
pub fn cache_source_file(store: &mut impl Store, file: SourceFile) {
    store.update::<CachedSourceFiles, _>(|files| {
        match files.iter_mut().find(|f| f.fullname == file.fullname) {
            Some(cached) => *cached = file,
            None => files.push(file),
        }
    });
}

/// Return true if a file named `fullname` is in the cache.
pub fn is_cached(store: &impl Store, fullname: Option<&str>) -> bool {
    fullname.is_some_and(|name| {
        store
            .get::<CachedSourceFiles>()
            .iter()
            .any(|f| f.fullname == name)
    })
}

/// Save disassembly. If the file it belongs to is cached, instructions are grouped by
/// source line into the file's assembly mapping, otherwise they are saved
/// as a disassembly for missing file.
pub fn set_disassembly(
    store: &mut impl Store,
    fullname: Option<&str>,
    instructions: Vec<AsmLine>,
) {
    let mut files = store.get::<CachedSourceFiles>();
    let cached = match fullname {
        Some(name) => files.iter_mut().find(|f| f.fullname == name),
        None => None,
    };

    match cached {
        Some(file) => {
            file.assembly = instructions
                .into_iter()
                .filter_map(|instr| instr.line.map(|line| (line, instr.text)))
                .into_group_map()
                .into_iter()
                .map(|(line, texts)| (line, texts.join("\n")))
                .collect();
            store.set::<CachedSourceFiles>(files);
        }
        None => {
            let lines = instructions.into_iter().map(|instr| instr.text).collect();
            store.set::<DisassemblyForMissingFile>(lines);
        }
    }
}
