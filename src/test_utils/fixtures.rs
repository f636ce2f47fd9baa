//! Lockfile fixtures shared by unit and integration tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A named lockfile document.
pub struct LockfileFixture {
    pub content: String,
    pub name: String,
}

impl LockfileFixture {
    /// npm-only lockfile with two unrelated packages and two remote modules.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"{
  "version": "3",
  "packages": {
    "npm": {
      "nanoid@3.3.4": {
        "integrity": "sha512-MqBkQh/OHTS2egovRtLk45wEyNXwF+cokD+1YPf9u5VfJiRdAiRwB2froX5Co9Rh20xs4siNPm8naNotSD6RBw=="
      },
      "picocolors@1.0.0": {
        "integrity": "sha512-foobar"
      }
    }
  },
  "remote": {
    "https://deno.land/std@0.71.0/async/delay.ts": "35957d585a6e3dd87706858fb1d6b551cb278271b03f52c5a2cb70e65e00c26a",
    "https://deno.land/std@0.71.0/textproto/mod.ts": "3118d7a42c03c242c5a49c2ad91c8396110e14acca1324e7aaefd31a999b71a4"
  }
}
"#
            .to_string(),
        }
    }

    /// A workspace with a root and one member, jsr and npm packages, and
    /// entries that the declared roots do not reach.
    ///
    /// Canonical form: printing the parsed document reproduces it exactly.
    pub fn workspace() -> Self {
        Self {
            name: "workspace".to_string(),
            content: r#"{
  "version": "3",
  "packages": {
    "specifiers": {
      "jsr:@std/assert@1": "jsr:@std/assert@1.0.0",
      "jsr:@std/fs@1": "jsr:@std/fs@1.0.0",
      "jsr:@std/path@1": "jsr:@std/path@1.0.0",
      "jsr:@std/testing@1": "jsr:@std/testing@1.0.0",
      "npm:chalk@5": "npm:chalk@5.0.0",
      "npm:left-pad@1": "npm:left-pad@1.3.0"
    },
    "jsr": {
      "@std/assert@1.0.0": {
        "integrity": "assert-hash"
      },
      "@std/fs@1.0.0": {
        "integrity": "fs-hash",
        "dependencies": [
          "jsr:@std/path@1"
        ]
      },
      "@std/path@1.0.0": {
        "integrity": "path-hash"
      },
      "@std/testing@1.0.0": {
        "integrity": "testing-hash",
        "dependencies": [
          "jsr:@std/fs@1"
        ]
      }
    },
    "npm": {
      "ansi-styles@4.1.0": {
        "integrity": "sha512-ansi"
      },
      "chalk@5.0.0": {
        "integrity": "sha512-chalk",
        "dependencies": {
          "ansi-styles": "ansi-styles@4.1.0"
        }
      },
      "is-odd@3.0.1": {
        "integrity": "sha512-is-odd"
      },
      "left-pad@1.3.0": {
        "integrity": "sha512-left-pad"
      }
    }
  },
  "redirects": {
    "https://deno.land/x/oak/mod.ts": "https://deno.land/x/oak@v12.6.1/mod.ts"
  },
  "remote": {
    "https://deno.land/x/oak@v12.6.1/mod.ts": "oak-hash"
  },
  "workspace": {
    "dependencies": [
      "jsr:@std/testing@1"
    ],
    "packageJson": {
      "dependencies": [
        "npm:chalk@5"
      ]
    },
    "members": {
      "tools": {
        "packageJson": {
          "dependencies": [
            "npm:left-pad@1"
          ]
        }
      }
    }
  }
}
"#
            .to_string(),
        }
    }

    /// Version 2 lockfile that is upgraded on load.
    pub fn v2() -> Self {
        Self {
            name: "v2".to_string(),
            content: r#"{
  "version": "2",
  "remote": {
    "https://deno.land/std@0.71.0/async/delay.ts": "35957d585a6e3dd87706858fb1d6b551cb278271b03f52c5a2cb70e65e00c26a"
  },
  "npm": {
    "specifiers": {
      "nanoid": "nanoid@3.3.4"
    },
    "packages": {
      "nanoid@3.3.4": {
        "integrity": "sha512-nanoid",
        "dependencies": {}
      }
    }
  }
}"#
            .to_string(),
        }
    }

    /// Write the lockfile to `deno.lock` in a directory.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let lockfile_path = dir.join("deno.lock");
        fs::write(&lockfile_path, &self.content)?;
        Ok(lockfile_path)
    }
}
