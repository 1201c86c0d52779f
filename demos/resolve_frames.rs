use cueframe::{FrameIndex, PreparedScene, SceneDescriptor, TemplateRegistry, fingerprint_frame};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/bullet_scene.json");
    let descriptor = SceneDescriptor::from_json_str(s)?;
    let scene = PreparedScene::prepare(descriptor, TemplateRegistry::builtin())?;

    for f in [0u64, 36, 54, 90, 150, 299] {
        let state = scene.frame_state(FrameIndex(f));
        let fp = fingerprint_frame(&state);
        println!(
            "frame {f}: {} cues, fingerprint {:016x}{:016x}",
            state.cues.len(),
            fp.hi,
            fp.lo
        );
    }

    Ok(())
}
