//! Assets file fixtures.
//!
//! `ASSETS_JSON` reproduces a restore that matched `NEST >= 1.9.0`
//! approximately to 1.9.1 and recorded `Newtonsoft.Json` in lower case in
//! the library set.

/// Target name used by the fixtures.
pub const TARGET: &str = ".NETFramework,Version=v4.7.2";

/// Runtime-specific target used by the fixtures.
pub const RUNTIME_TARGET: &str = ".NETFramework,Version=v4.7.2/win7-x86";

pub const ASSETS_JSON: &str = r#"{
  "version": 3,
  "targets": {
    ".NETFramework,Version=v4.7.2": {
      "Contoso.Logging/1.0.0": {
        "type": "package",
        "dependencies": {
          "NEST": "1.9.0",
          "Newtonsoft.Json": "9.0.1"
        },
        "compile": { "lib/net472/Contoso.Logging.dll": {} },
        "runtime": { "lib/net472/Contoso.Logging.dll": {} }
      },
      "Elasticsearch.Net/1.9.1": {
        "type": "package"
      },
      "NEST/1.9.1": {
        "type": "package",
        "dependencies": {
          "Elasticsearch.Net": "[1.9.1]",
          "Newtonsoft.Json": "9.0.1"
        }
      },
      "Newtonsoft.Json/9.0.1": {
        "type": "package"
      }
    },
    ".NETFramework,Version=v4.7.2/win7-x86": {
      "Contoso.Logging/1.0.0": {
        "type": "package",
        "dependencies": { "Newtonsoft.Json": "9.0.1" }
      },
      "Newtonsoft.Json/9.0.1": {
        "type": "package"
      }
    }
  },
  "libraries": {
    "Contoso.Logging/1.0.0": {
      "sha512": "Y29udG9zby5sb2dnaW5n",
      "type": "package",
      "path": "contoso.logging/1.0.0",
      "files": [
        "contoso.logging.1.0.0.nupkg.sha512",
        "contoso.logging.nuspec",
        "lib/net472/Contoso.Logging.dll"
      ]
    },
    "Elasticsearch.Net/1.9.1": {
      "sha512": "ZWxhc3RpY3NlYXJjaA==",
      "type": "package",
      "path": "elasticsearch.net/1.9.1",
      "files": ["lib/net45/Elasticsearch.Net.dll"]
    },
    "NEST/1.9.1": {
      "sha512": "bmVzdA==",
      "type": "package",
      "path": "nest/1.9.1",
      "files": ["lib/net45/Nest.dll"]
    },
    "newtonsoft.json/9.0.1": {
      "sha512": "bmV3dG9uc29mdA==",
      "type": "package",
      "path": "newtonsoft.json/9.0.1",
      "files": ["lib/net45/Newtonsoft.Json.dll"]
    }
  },
  "projectFileDependencyGroups": {
    ".NETFramework,Version=v4.7.2": [
      "Contoso.Logging >= 1.0.0"
    ]
  },
  "project": {
    "version": "1.0.0",
    "restore": { "projectName": "Contoso.Service" }
  }
}"#;

/// Two packages that depend on each other.
pub const CYCLIC_ASSETS_JSON: &str = r#"{
  "version": 3,
  "targets": {
    "net472": {
      "A/1.0.0": { "type": "package", "dependencies": { "B": "1.0.0" } },
      "B/1.0.0": { "type": "package", "dependencies": { "A": "1.0.0" } }
    }
  },
  "libraries": {
    "A/1.0.0": { "type": "package", "path": "a/1.0.0" },
    "B/1.0.0": { "type": "package", "path": "b/1.0.0" }
  }
}"#;
