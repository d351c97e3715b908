use clap::Parser;
use machine_price_estimator::{
    app,
    cli::{Cli, Commands},
    config, logging,
    scenario::Scenario,
    ui_cli, MachineType,
};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 서브커맨드 또는 대화형 메뉴를 실행한다.
fn main() {
    logging::init_tracing("warn");
    if let Err(err) = try_run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), app::AppError> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default_at(&cli.config)?;
    let tr = app::translator_for(&cfg, cli.lang.as_deref());
    tracing::debug!(lang = tr.language_code(), config = %cli.config.display(), "starting");

    match cli.command {
        None => app::run(&mut cfg, &cli.config, tr)?,
        Some(Commands::Estimate(args)) => {
            app::estimate_command(&cfg, &tr, &args)?;
        }
        Some(Commands::Ranges { machine }) => {
            let machines = match machine {
                Some(name) => vec![name.parse::<MachineType>()?],
                None => MachineType::ALL.to_vec(),
            };
            print!("{}", ui_cli::render_ranges(&machines));
        }
        Some(Commands::Coefficients { scenario }) => {
            let scenarios = match scenario {
                Some(name) => vec![name.parse::<Scenario>()?],
                None => Scenario::ALL.to_vec(),
            };
            print!("{}", ui_cli::render_coefficients(&tr, &scenarios));
        }
    }
    Ok(())
}
