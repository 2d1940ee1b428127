use crate::assembler::assemble;
use crate::binder::bind_methods;
use crate::config::{AnalyzerConfig, ResolutionSchedule};
use crate::context::AnalysisContext;
use crate::discovery::PackageMap;
use crate::error::{EngineError, Result};
use crate::extractor::{BodyJob, Extractor, SourceUnit};
use crate::resolver::resolve_body;
use crate::strategy::{self, ResolutionStrategy};
use crate::types::ProjectStructure;
use codegraph_syntax::{scan_package_clause, Decl, GoParser, SourceFile};
use std::path::{Component, Path};

/// Runs discovery, extraction, binding, resolution and assembly
pub struct Analyzer {
    config: AnalyzerConfig,
    strategy: Box<dyn ResolutionStrategy>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let strategy = strategy::for_kind(config.strategy);
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze files on disk; module keys are paths relative to `root`
    ///
    /// A file that fails to parse is logged and contributes nothing.
    pub fn analyze_files<P: AsRef<Path>>(
        &self,
        root: &Path,
        files: &[P],
    ) -> Result<ProjectStructure> {
        log::info!("Analyzing {} source files under {}", files.len(), root.display());
        let packages = PackageMap::discover(files);
        let mut parser = new_parser()?;

        let mut units = Vec::with_capacity(files.len());
        for path in files {
            let path = path.as_ref();
            let module_key = module_key(root, path);
            match parser
                .parse_file(path)
                .map_err(|e| EngineError::syntax(module_key.as_str(), e))
            {
                Ok(file) => units.push(self.unit(&packages, path, module_key, file)),
                Err(e) => log::warn!("Skipping unit: {e}"),
            }
        }

        self.run(units)
    }

    /// Analyze in-memory sources given as `(relative path, text)` pairs
    pub fn analyze_sources(&self, sources: &[(&str, &str)]) -> Result<ProjectStructure> {
        let mut packages = PackageMap::new();
        for (path, text) in sources {
            match scan_package_clause(text) {
                Ok(package) => packages.record(Path::new(path), package),
                Err(e) => log::warn!("Skipping {path} during package discovery: {e}"),
            }
        }

        let mut parser = new_parser()?;
        let mut units = Vec::with_capacity(sources.len());
        for (path, text) in sources {
            match parser
                .parse_source(text)
                .map_err(|e| EngineError::syntax(*path, e))
            {
                Ok(file) => {
                    units.push(self.unit(&packages, Path::new(path), path.to_string(), file))
                }
                Err(e) => log::warn!("Skipping unit: {e}"),
            }
        }

        self.run(units)
    }

    fn unit(
        &self,
        packages: &PackageMap,
        path: &Path,
        module_key: String,
        file: SourceFile,
    ) -> SourceUnit {
        let package = match packages.package_for(path) {
            Some(package) => package.to_string(),
            None => {
                log::debug!("{module_key}: no discovered package, using clause {}", file.package);
                file.package.clone()
            }
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| module_key.clone());

        SourceUnit {
            module_key,
            file_name,
            package,
            file,
        }
    }

    fn run(&self, units: Vec<SourceUnit>) -> Result<ProjectStructure> {
        let mut ctx = AnalysisContext::new();
        let strategy = self.strategy.as_ref();
        let schedule = self.config.schedule;
        log::debug!(
            "Resolving {} units ({:?} schedule, {} strategy)",
            units.len(),
            schedule,
            strategy.name()
        );

        match schedule {
            ResolutionSchedule::Interleaved => {
                for unit in &units {
                    Extractor::new(&mut ctx, unit, schedule, strategy).run();
                    let methods = bind_methods(&mut ctx, unit);
                    for job in methods {
                        resolve_job(&mut ctx, strategy, unit, job);
                    }
                }
            }
            ResolutionSchedule::Deferred => {
                let mut pending: Vec<(usize, BodyJob)> = Vec::new();
                for (i, unit) in units.iter().enumerate() {
                    let jobs = Extractor::new(&mut ctx, unit, schedule, strategy).run();
                    pending.extend(jobs.into_iter().map(|job| (i, job)));
                }
                for (i, unit) in units.iter().enumerate() {
                    let jobs = bind_methods(&mut ctx, unit);
                    pending.extend(jobs.into_iter().map(|job| (i, job)));
                }
                // source order within each unit
                pending.sort_by_key(|(i, job)| (*i, job.decl));
                for (i, job) in pending {
                    resolve_job(&mut ctx, strategy, &units[i], job);
                }
            }
        }

        assemble(ctx, &self.config.project_name)
    }
}

fn resolve_job(
    ctx: &mut AnalysisContext,
    strategy: &dyn ResolutionStrategy,
    unit: &SourceUnit,
    job: BodyJob,
) {
    let Some(Decl::Func(func)) = unit.file.decls.get(job.decl) else {
        return;
    };
    if let Some(body) = &func.body {
        resolve_body(ctx, strategy, job.owner, func.recv.as_ref(), &func.ty, body);
    }
}

/// `root`-relative path with `/` separators
fn module_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        relative.display().to_string()
    } else {
        parts.join("/")
    }
}

fn new_parser() -> Result<GoParser> {
    GoParser::new().map_err(|e| EngineError::other(format!("Failed to create Go parser: {e}")))
}
