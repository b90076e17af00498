#![no_main]

use libfuzzer_sys::fuzz_target;
use osucad_editor_core::{Beatmap, Command, CommandHandlerRegistry, CommandManager};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(command) = serde_json::from_str::<Command>(json) {
            let mut manager =
                CommandManager::new(Beatmap::new(), CommandHandlerRegistry::with_default_handlers());
            manager.apply_remote(command.clone());
            manager.submit(command, true);
            manager.undo();
            manager.redo();
        }
    }
});
